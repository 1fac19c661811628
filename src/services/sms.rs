//! Outbound SMS and MMS.

use crate::error::Result;
use crate::transport::Transport;
use serde::{Deserialize, Serialize};

/// Text plus optional media attachment URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SendMessageRequest {
    pub from: String,
    pub to: String,
    pub message_body: MessageBody,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    /// Message validity period in minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

/// Accepted message as echoed back by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub charge: String,
    pub delivered_at: Option<String>,
    pub direction: String,
    pub error_message: Option<String>,
    pub from: String,
    pub to: String,
    pub mcc: String,
    pub mnc: String,
    pub message_body: MessageBody,
    pub message_id: String,
    pub message_type: String,
    pub segments: u32,
    pub sent_at: Option<String>,
    pub status: String,
    pub submitted_at: String,
    pub tag: Option<String>,
}

/// Messaging endpoints.
#[derive(Debug, Clone)]
pub struct Sms {
    transport: Transport,
}

impl Sms {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// `POST /v2/messages`: submit an SMS or MMS for delivery.
    pub async fn send_message(&self, request: &SendMessageRequest) -> Result<Message> {
        self.transport.post("/v2/messages", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_stay_off_the_wire() {
        let request = SendMessageRequest {
            from: "15551230001".to_owned(),
            to: "15551230002".to_owned(),
            message_body: MessageBody {
                text: "hello".to_owned(),
                media: None,
            },
            ..SendMessageRequest::default()
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["message_body"]["text"], "hello");
        assert!(json["message_body"].get("media").is_none());
        assert!(json.get("callback_url").is_none());
        assert!(json.get("validity").is_none());
        assert!(json.get("external_id").is_none());
    }

    #[test]
    fn mms_media_is_a_url_list() {
        let request = SendMessageRequest {
            message_body: MessageBody {
                text: "see attached".to_owned(),
                media: Some(vec!["https://cdn.example.com/pic.png".to_owned()]),
            },
            ..SendMessageRequest::default()
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["message_body"]["media"][0], "https://cdn.example.com/pic.png");
    }
}
