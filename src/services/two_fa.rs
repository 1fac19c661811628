//! Two-factor verification sessions.

use crate::error::Result;
use crate::transport::{Ack, Transport};
use crate::transport::query::path_with_query;
use crate::validate;
use serde::{Deserialize, Serialize};

/// Delivery channels for verification codes.
pub const CHANNELS: &[&str] = &["sms", "voice"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    pub created_at: String,
    pub session_id: String,
    pub phone_number: String,
    pub destination_country: String,
    pub status: String,
    pub charge: String,
    pub service_id: String,
    pub service_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationEvent {
    pub created_at: String,
    pub event: String,
    pub status: String,
    pub charge: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lookup {
    pub number_type: String,
    pub country: String,
    pub current_carrier: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct VerificationsQuery {
    /// Start date, `YYYY-MM-DD`. Required.
    pub from: String,
    /// End date, `YYYY-MM-DD`. Required.
    pub to: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateVerificationRequest {
    pub service_id: String,
    pub to: String,
    /// One of [`CHANNELS`].
    pub channel: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedVerification {
    pub success: bool,
    pub service_id: String,
    pub session_url: String,
    pub session_id: String,
    pub destination: String,
    pub created_at: String,
    pub lookup: Lookup,
    pub charge: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResentCode {
    pub success: bool,
    pub channel: String,
    pub destination: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeCheck {
    pub is_valid: bool,
}

#[derive(Debug, Clone, Serialize)]
struct ChannelBody<'a> {
    channel: &'a str,
}

#[derive(Debug, Clone, Serialize)]
struct CodeBody<'a> {
    code: &'a str,
}

/// Two-factor authentication endpoints.
#[derive(Debug, Clone)]
pub struct TwoFa {
    transport: Transport,
}

impl TwoFa {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// `GET /v1/two-fa/service/{id}/sessions`: verification sessions started
    /// under one service within a date range.
    pub async fn service_verifications(
        &self,
        service_id: &str,
        query: &VerificationsQuery,
    ) -> Result<Vec<Verification>> {
        validate::date("from", &query.from)?;
        validate::date("to", &query.to)?;
        let path = path_with_query(
            &format!("/v1/two-fa/service/{service_id}/sessions"),
            query,
        )?;
        self.transport.get(&path).await
    }

    /// `GET /v1/two-fa/session/{id}/events`: delivery events for one session.
    pub async fn session_events(&self, session_id: &str) -> Result<Vec<VerificationEvent>> {
        self.transport
            .get(&format!("/v1/two-fa/session/{session_id}/events"))
            .await
    }

    /// `POST /v1/two-fa/verification`: start a verification session.
    pub async fn create_verification(
        &self,
        request: &CreateVerificationRequest,
    ) -> Result<CreatedVerification> {
        validate::required("service_id", &request.service_id)?;
        validate::required("to", &request.to)?;
        validate::one_of("channel", &request.channel, CHANNELS)?;
        self.transport.post("/v1/two-fa/verification", request).await
    }

    /// `POST /v1/two-fa/verification/{id}`: resend the code over a channel.
    pub async fn resend_code(&self, session_id: &str, channel: &str) -> Result<ResentCode> {
        validate::one_of("channel", channel, CHANNELS)?;
        self.transport
            .post(
                &format!("/v1/two-fa/verification/{session_id}"),
                &ChannelBody { channel },
            )
            .await
    }

    /// `POST /v1/two-fa/verification/{id}/check`: check a code the end user
    /// entered.
    pub async fn validate_code(&self, session_id: &str, code: &str) -> Result<CodeCheck> {
        validate::required("code", code)?;
        self.transport
            .post(
                &format!("/v1/two-fa/verification/{session_id}/check"),
                &CodeBody { code },
            )
            .await
    }

    /// `PATCH /v1/two-fa/verification/{id}/cancel`: abort a running session.
    pub async fn cancel_verification(&self, session_id: &str) -> Result<Ack> {
        self.transport
            .patch(&format!("/v1/two-fa/verification/{session_id}/cancel"), &())
            .await
    }
}
