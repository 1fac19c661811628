//! HTTP transport: one request/response pair per call, with uniform
//! success/error envelope normalization.

pub(crate) mod query;
pub(crate) mod ws;

use crate::error::{ApiError, Error, Result};
use reqwest::StatusCode;
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::multipart;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Minimal acknowledgement body returned by most mutating endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ack {
    #[serde(default)]
    pub success: bool,
}

/// Pagination metadata echoed back by list endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    pub current_page: u32,
    pub per_page: u32,
    pub total: u32,
    pub total_pages: u32,
}

/// Standard paginated envelope: items plus the echoed [`Pagination`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Default for Paginated<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pagination: Pagination::default(),
        }
    }
}

/// One file destined for a multipart upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// Multipart field key the server expects the file under.
    pub field: String,
    /// Filename reported in the part headers.
    pub file_name: String,
    /// Raw file contents.
    pub data: Vec<u8>,
}

/// Shared HTTP transport.
///
/// Holds the immutable base URL and `appid` credential; cheap to clone, one
/// `reqwest::Client` behind it. Every request gets a fixed 10-second timeout
/// and the `appid` query parameter appended.
#[derive(Debug, Clone)]
pub(crate) struct Transport {
    base_url: Url,
    app_id: String,
    client: reqwest::Client,
}

impl Transport {
    pub fn new(base_url: &str, app_id: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            base_url: Url::parse(base_url)?,
            app_id: app_id.into(),
            client,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub async fn get<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let response = self.client.get(self.endpoint(path)).send().await?;
        read_response(response).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned + Default,
        B: Serialize + ?Sized,
    {
        let response = self
            .client
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await?;
        read_response(response).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned + Default,
        B: Serialize + ?Sized,
    {
        let response = self
            .client
            .put(self.endpoint(path))
            .json(body)
            .send()
            .await?;
        read_response(response).await
    }

    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned + Default,
        B: Serialize + ?Sized,
    {
        let response = self
            .client
            .patch(self.endpoint(path))
            .json(body)
            .send()
            .await?;
        read_response(response).await
    }

    pub async fn delete<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let response = self.client.delete(self.endpoint(path)).send().await?;
        read_response(response).await
    }

    /// Binary file retrieval. The response must announce itself as an
    /// attachment via `Content-Disposition`; anything else is an error, no
    /// matter the status code or body.
    pub async fn download(&self, path: &str) -> Result<Vec<u8>> {
        let response = self.client.get(self.endpoint(path)).send().await?;
        let is_attachment = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.contains("attachment"));
        if !is_attachment {
            return Err(Error::NoAttachment);
        }
        Ok(response.bytes().await?.to_vec())
    }

    /// Multipart upload: exactly one file part plus auxiliary string fields.
    pub async fn upload(
        &self,
        path: &str,
        file: UploadFile,
        fields: Vec<(String, String)>,
    ) -> Result<Ack> {
        let part = multipart::Part::bytes(file.data).file_name(file.file_name);
        let mut form = multipart::Form::new().part(file.field, part);
        for (key, value) in fields {
            form = form.text(key, value);
        }

        let response = self
            .client
            .post(self.endpoint(path))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.bytes().await?;
            if let Ok(serde_json::Value::Object(object)) = serde_json::from_slice(&body) {
                if object.get("error") == Some(&serde_json::Value::Bool(true)) {
                    return Err(Error::Api(error_details(&object)));
                }
            }
            return Err(Error::Api(ApiError {
                message: format!("Unknown error with status {status}"),
                errors: None,
            }));
        }

        Ok(Ack { success: true })
    }

    /// Appends `appid` with `?` or `&` depending on whether the path already
    /// carries a query string.
    fn endpoint(&self, path: &str) -> String {
        let joined = format!("{}{path}", self.base_url.as_str().trim_end_matches('/'));
        let separator = if joined.contains('?') { '&' } else { '?' };
        format!("{joined}{separator}appid={}", self.app_id)
    }
}

async fn read_response<T>(response: reqwest::Response) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let status = response.status();
    if status == StatusCode::NO_CONTENT {
        return Ok(T::default());
    }
    let body = response.bytes().await?;
    decode_body(status, &body)
}

/// Normalize one response body.
///
/// An empty `200` body is success with the default result; a JSON object with
/// `"error": true` or `"success": false` is an API failure regardless of
/// status; everything else decodes into the declared shape.
fn decode_body<T>(status: StatusCode, body: &[u8]) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if body.is_empty() && status == StatusCode::OK {
        return Ok(T::default());
    }

    if let Ok(serde_json::Value::Object(object)) = serde_json::from_slice(body) {
        let failed = object.get("error") == Some(&serde_json::Value::Bool(true))
            || object.get("success") == Some(&serde_json::Value::Bool(false));
        if failed {
            return Err(Error::Api(error_details(&object)));
        }
    }

    Ok(serde_json::from_slice(body)?)
}

fn error_details(object: &serde_json::Map<String, serde_json::Value>) -> ApiError {
    let message = object
        .get("message")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("Unknown error")
        .to_owned();
    let errors = object
        .get("errors")
        .and_then(|value| serde_json::from_value(value.clone()).ok());
    ApiError { message, errors }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Deserialize, PartialEq, Eq)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[test]
    fn empty_200_body_is_default_success() {
        let result: Sample = decode_body(StatusCode::OK, b"").unwrap();
        assert_eq!(result, Sample::default());
    }

    #[test]
    fn empty_body_with_other_status_is_decode_error() {
        let result: Result<Sample> = decode_body(StatusCode::BAD_GATEWAY, b"");
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn error_true_wins_over_200_status() {
        let body = br#"{"error": true, "message": "DID not found"}"#;
        let result: Result<Sample> = decode_body(StatusCode::OK, body);
        match result {
            Err(Error::Api(api)) => assert_eq!(api.message, "DID not found"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn success_false_is_an_api_error() {
        let body = br#"{"success": false, "message": "insufficient funds"}"#;
        let result: Result<Ack> = decode_body(StatusCode::OK, body);
        match result {
            Err(Error::Api(api)) => assert_eq!(api.message, "insufficient funds"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn missing_message_falls_back_to_unknown_error() {
        let body = br#"{"error": true}"#;
        let result: Result<Sample> = decode_body(StatusCode::OK, body);
        match result {
            Err(Error::Api(api)) => assert_eq!(api.message, "Unknown error"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn field_errors_are_extracted() {
        let body = br#"{"success": false, "message": "invalid", "errors": {"to": "is empty"}}"#;
        let result: Result<Sample> = decode_body(StatusCode::OK, body);
        match result {
            Err(err @ Error::Api(_)) => {
                let fields = err.field_errors().unwrap();
                assert_eq!(fields.get("to").map(String::as_str), Some("is empty"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn well_formed_body_decodes_into_declared_shape() {
        let body = br#"{"name": "trunk-1", "count": 3}"#;
        let result: Sample = decode_body(StatusCode::OK, body).unwrap();
        assert_eq!(result.name, "trunk-1");
        assert_eq!(result.count, 3);
    }

    #[test]
    fn success_true_objects_are_not_errors() {
        let body = br#"{"success": true}"#;
        let result: Ack = decode_body(StatusCode::OK, body).unwrap();
        assert!(result.success);
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let result: Result<Sample> = decode_body(StatusCode::OK, b"<html>502</html>");
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn pagination_envelope_passes_through_unchanged() {
        let body = br#"{
            "items": [{"name": "a", "count": 1}],
            "pagination": {"current_page": 2, "per_page": 10, "total": 25, "total_pages": 3}
        }"#;
        let page: Paginated<Sample> = decode_body(StatusCode::OK, body).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.pagination.current_page, 2);
        assert_eq!(page.pagination.per_page, 10);
        assert_eq!(page.pagination.total, 25);
        assert_eq!(page.pagination.total_pages, 3);
    }

    #[test]
    fn appid_is_appended_with_the_right_separator() {
        let transport = Transport::new("https://api.wavix.com", "key-1").unwrap();
        assert_eq!(
            transport.endpoint("/v1/profile"),
            "https://api.wavix.com/v1/profile?appid=key-1"
        );
        assert_eq!(
            transport.endpoint("/v1/cdr?type=placed"),
            "https://api.wavix.com/v1/cdr?type=placed&appid=key-1"
        );
    }
}
