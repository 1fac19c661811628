//! Client configuration.

/// Production API host used when no base URL is supplied.
pub const DEFAULT_BASE_URL: &str = "https://api.wavix.com";

/// Options for constructing a [`crate::WavixClient`].
///
/// Only the application identifier is required; the base URL defaults to the
/// production endpoint. The resolved configuration is immutable once the
/// client is built and is shared read-only by every service and the event
/// stream.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Credential appended to every request as the `appid` query parameter.
    pub app_id: String,
    /// Optional base URL override (e.g. a sandbox endpoint).
    pub base_url: Option<String>,
}

impl ClientOptions {
    /// Create options with the default production base URL.
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            base_url: None,
        }
    }

    /// Override the base URL.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub(crate) fn resolved_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_defaults_to_production() {
        let options = ClientOptions::new("key");
        assert_eq!(options.resolved_base_url(), "https://api.wavix.com");
    }

    #[test]
    fn base_url_override_is_used() {
        let options = ClientOptions::new("key").base_url("https://sandbox.wavix.com");
        assert_eq!(options.resolved_base_url(), "https://sandbox.wavix.com");
    }
}
