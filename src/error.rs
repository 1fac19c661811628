use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Structured failure payload reported by the Wavix API.
///
/// Any JSON response object carrying `"error": true` or `"success": false` is
/// normalized into this shape, regardless of the HTTP status code that came
/// with it.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ApiError {
    /// Human-readable error message (`"Unknown error"` when the server omits it).
    pub message: String,
    /// Optional per-field error map.
    pub errors: Option<HashMap<String, String>>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A request field failed a local constraint check.
///
/// Produced before any network call is issued; the offending request never
/// reaches the transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} {message}")]
pub struct ValidationError {
    /// Name of the violated field as it appears on the wire.
    pub field: &'static str,
    /// What the constraint expected.
    pub message: String,
}

impl ValidationError {
    pub(crate) fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Failure shape specific to starting a call.
///
/// `POST /v1/call` reports failures with its own envelope (success flag,
/// message and a field-error map) instead of the general [`ApiError`]
/// convention, so it is modeled separately.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct StartCallError {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub error: HashMap<String, String>,
}

impl StartCallError {
    pub(crate) fn from_message(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error: HashMap::new(),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to parse or serialize JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("failed to encode query string: {0}")]
    Query(#[from] serde_urlencoded::ser::Error),

    #[error("Wavix API error: {0}")]
    Api(ApiError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("No file was downloaded")]
    NoAttachment,

    #[error("the event stream is already connected")]
    AlreadyConnected,
}

impl Error {
    /// API-reported field errors, when this is an [`Error::Api`] carrying any.
    #[must_use]
    pub fn field_errors(&self) -> Option<&HashMap<String, String>> {
        match self {
            Self::Api(api) => api.errors.as_ref(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
