//! Speech analytics: transcription search, requests and retrieval.

use crate::error::Result;
use crate::transport::{Ack, Paginated, Transport};
use crate::validate;
use serde::{Deserialize, Serialize};

/// Transcription languages the engine supports.
pub const LANGUAGES: &[&str] = &["en", "de", "es"];

/// Call directions accepted by the search filter.
pub const CALL_TYPES: &[&str] = &["received", "placed"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptionRef {
    pub uuid: String,
    pub url: String,
}

/// One call with transcription metadata attached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechCall {
    pub charge: String,
    pub date: String,
    pub destination: String,
    pub disposition: String,
    pub duration: u32,
    pub forward_fee: String,
    pub from: String,
    pub to: String,
    pub per_minute: String,
    pub uuid: String,
    pub sip_trunk: String,
    pub transcription: Option<TranscriptionRef>,
}

/// Full-text terms applied to one side of the conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptionTerms {
    pub must: Vec<String>,
    #[serde(rename = "match")]
    pub matches: Vec<String>,
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptionFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<TranscriptionTerms>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<TranscriptionTerms>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub any: Option<TranscriptionTerms>,
}

/// Search request. Unlike the plain CDR listing this endpoint takes its
/// filters as a JSON body.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SpeechCallsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    /// Start date, `YYYY-MM-DD`. Required.
    pub from: String,
    /// End date, `YYYY-MM-DD`. Required.
    pub to: String,
    /// One of [`CALL_TYPES`].
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sip_trunk: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcription: Option<TranscriptionFilter>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TranscribeRequest {
    /// One of [`LANGUAGES`].
    pub language: String,
    /// Webhook invoked when the transcription completes. Required.
    pub webhook_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptTurn {
    pub phone_number: String,
    /// Turn start offset.
    pub s: String,
    /// Turn end offset.
    pub e: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionResult {
    pub transcription: serde_json::Value,
    pub turns: Vec<TranscriptTurn>,
    pub uuid: String,
    pub language: String,
    pub duration: u32,
    pub charge: String,
    pub status: String,
    pub transcription_date: String,
}

/// Speech analytics endpoints.
#[derive(Debug, Clone)]
pub struct Speech {
    transport: Transport,
}

impl Speech {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// `POST /v1/cdr`: search calls by date range, direction and transcription
    /// content.
    pub async fn calls(&self, request: &SpeechCallsRequest) -> Result<Paginated<SpeechCall>> {
        validate::date("from", &request.from)?;
        validate::date("to", &request.to)?;
        validate::one_of("type", &request.kind, CALL_TYPES)?;
        self.transport.post("/v1/cdr", request).await
    }

    /// `PUT /v1/cdr/{id}/retranscribe`: queue a call for transcription.
    pub async fn transcribe(&self, call_id: &str, request: &TranscribeRequest) -> Result<Ack> {
        validate::one_of("language", &request.language, LANGUAGES)?;
        validate::http_url("webhook_url", &request.webhook_url)?;
        self.transport
            .put(&format!("/v1/cdr/{call_id}/retranscribe"), request)
            .await
    }

    /// `GET /v1/cdr/{id}/transcription`: fetch the finished transcription.
    pub async fn transcription(&self, call_id: &str) -> Result<TranscriptionResult> {
        self.transport
            .get(&format!("/v1/cdr/{call_id}/transcription"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terms_serialize_match_under_its_wire_key() {
        let terms = TranscriptionTerms {
            must: vec!["refund".to_owned()],
            matches: vec!["cancel".to_owned()],
            exclude: vec![],
        };
        let json = serde_json::to_value(&terms).unwrap();
        assert_eq!(json["match"][0], "cancel");
        assert!(json.get("matches").is_none());
    }

    #[test]
    fn language_is_constrained() {
        assert!(validate::one_of("language", "fr", LANGUAGES).is_err());
        assert!(validate::one_of("language", "de", LANGUAGES).is_ok());
    }

    #[test]
    fn search_request_keeps_unset_filters_off_the_wire() {
        let request = SpeechCallsRequest {
            from: "2024-01-01".to_owned(),
            to: "2024-01-31".to_owned(),
            kind: "received".to_owned(),
            ..SpeechCallsRequest::default()
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["type"], "received");
        assert!(json.get("transcription").is_none());
        assert!(json.get("min_duration").is_none());
    }
}
