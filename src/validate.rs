//! Stateless field-constraint helpers.
//!
//! Each service validates its request against these rules before issuing any
//! network call; a failure short-circuits with [`ValidationError`] and the
//! request never reaches the transport.

use crate::error::ValidationError;

type Checked = Result<(), ValidationError>;

/// The field must be a non-empty string.
pub(crate) fn required(field: &'static str, value: &str) -> Checked {
    if value.is_empty() {
        return Err(ValidationError::new(field, "is required"));
    }
    Ok(())
}

/// The field must be a non-zero integer.
pub(crate) fn required_id(field: &'static str, value: i64) -> Checked {
    if value == 0 {
        return Err(ValidationError::new(field, "is required"));
    }
    Ok(())
}

/// The field must take one of the allowed values.
pub(crate) fn one_of(field: &'static str, value: &str, allowed: &[&str]) -> Checked {
    if allowed.contains(&value) {
        return Ok(());
    }
    Err(ValidationError::new(
        field,
        format!("must be one of: {}", allowed.join(", ")),
    ))
}

/// Integer variant of [`one_of`].
pub(crate) fn one_of_ids(field: &'static str, value: i64, allowed: &[i64]) -> Checked {
    if allowed.contains(&value) {
        return Ok(());
    }
    let list = allowed
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    Err(ValidationError::new(field, format!("must be one of: {list}")))
}

/// The collection must contain at least `min` items.
pub(crate) fn min_len<T>(field: &'static str, items: &[T], min: usize) -> Checked {
    if items.len() < min {
        return Err(ValidationError::new(
            field,
            format!("must contain at least {min} item(s)"),
        ));
    }
    Ok(())
}

/// The field must parse as an absolute http(s) URL.
pub(crate) fn http_url(field: &'static str, value: &str) -> Checked {
    match url::Url::parse(value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        _ => Err(ValidationError::new(field, "must be a valid URL")),
    }
}

/// [`http_url`] applied only when the value is present and non-empty.
pub(crate) fn optional_http_url(field: &'static str, value: Option<&str>) -> Checked {
    match value {
        Some(value) if !value.is_empty() => http_url(field, value),
        _ => Ok(()),
    }
}

/// Minimal structural email check: one `@` with a non-empty local part and a
/// dotted domain.
pub(crate) fn email(field: &'static str, value: &str) -> Checked {
    let valid = value.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty()
            && domain.split('.').count() >= 2
            && domain.split('.').all(|part| !part.is_empty())
    });
    if valid {
        return Ok(());
    }
    Err(ValidationError::new(field, "must be a valid email address"))
}

/// IANA-style timezone name check (`Area/Location`, or `UTC`).
///
/// This is a format check only; membership in the tz database is left to the
/// server.
pub(crate) fn timezone(field: &'static str, value: &str) -> Checked {
    let well_formed = value == "UTC"
        || (value.contains('/')
            && !value.starts_with('/')
            && !value.ends_with('/')
            && value
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '_' | '+' | '-')));
    if well_formed {
        return Ok(());
    }
    Err(ValidationError::new(field, "must be a valid timezone name"))
}

/// The field must be a calendar date formatted `YYYY-MM-DD`.
pub(crate) fn date(field: &'static str, value: &str) -> Checked {
    if is_iso_date(value) {
        return Ok(());
    }
    Err(ValidationError::new(
        field,
        "must be a date in YYYY-MM-DD format",
    ))
}

/// [`date`] applied only when the value is present and non-empty.
pub(crate) fn optional_date(field: &'static str, value: Option<&str>) -> Checked {
    match value {
        Some(value) if !value.is_empty() => date(field, value),
        _ => Ok(()),
    }
}

fn is_iso_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return false;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| matches!(i, 4 | 7) || b.is_ascii_digit());
    if !digits_ok {
        return false;
    }
    let month: u8 = value[5..7].parse().unwrap_or(0);
    let day: u8 = value[8..10].parse().unwrap_or(0);
    (1..=12).contains(&month) && (1..=31).contains(&day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_empty() {
        assert!(required("from", "").is_err());
        assert!(required("from", "123").is_ok());
    }

    #[test]
    fn validation_error_names_the_field() {
        let err = required("status_callback", "").unwrap_err();
        assert_eq!(err.field, "status_callback");
        assert!(err.to_string().contains("status_callback"));
    }

    #[test]
    fn one_of_lists_allowed_values() {
        let err = one_of("channel", "email", &["sms", "voice"]).unwrap_err();
        assert!(err.message.contains("sms, voice"));
        assert!(one_of("channel", "voice", &["sms", "voice"]).is_ok());
    }

    #[test]
    fn date_accepts_iso_dates_only() {
        assert!(date("from", "2024-01-31").is_ok());
        assert!(date("from", "2024-13-01").is_err());
        assert!(date("from", "2024-00-10").is_err());
        assert!(date("from", "24-01-01").is_err());
        assert!(date("from", "2024/01/01").is_err());
        assert!(date("from", "2024-01-32").is_err());
    }

    #[test]
    fn url_requires_http_scheme() {
        assert!(http_url("audio_file", "https://cdn.example.com/a.wav").is_ok());
        assert!(http_url("audio_file", "not a url").is_err());
        assert!(http_url("audio_file", "ftp://example.com/a.wav").is_err());
        assert!(optional_http_url("sms_relay_url", None).is_ok());
        assert!(optional_http_url("sms_relay_url", Some("bad")).is_err());
    }

    #[test]
    fn email_is_structurally_checked() {
        assert!(email("contact_email", "ops@example.com").is_ok());
        assert!(email("contact_email", "ops@localhost").is_err());
        assert!(email("contact_email", "nope").is_err());
        assert!(email("contact_email", "@example.com").is_err());
    }

    #[test]
    fn timezone_format_is_checked() {
        assert!(timezone("timezone", "Europe/Berlin").is_ok());
        assert!(timezone("timezone", "America/Argentina/Buenos_Aires").is_ok());
        assert!(timezone("timezone", "UTC").is_ok());
        assert!(timezone("timezone", "Berlin").is_err());
        assert!(timezone("timezone", "/Berlin").is_err());
    }

    #[test]
    fn min_len_counts_items() {
        assert!(min_len("ids", &[1], 1).is_ok());
        assert!(min_len::<i32>("ids", &[], 1).is_err());
    }
}
