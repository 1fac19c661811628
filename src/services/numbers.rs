//! Phone number validation and carrier lookup.

use crate::error::Result;
use crate::transport::Transport;
use crate::transport::query::path_with_query;
use serde::{Deserialize, Serialize};

/// Lookup result for one phone number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberValidation {
    pub phone_number: String,
    pub valid: bool,
    pub country_code: String,
    pub e164_format: String,
    pub national_format: String,
    pub ported: bool,
    pub mcc: String,
    pub mnc: String,
    pub number_type: String,
    pub carrier_name: String,
    pub risky_destination: bool,
    pub unallocated_range: bool,
    pub reachable: bool,
    pub roaming: bool,
    pub timezone: String,
    pub charge: String,
    pub error_code: String,
}

/// Batch result. The server emits the item list under a capitalized key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchValidation {
    pub status: String,
    pub count: u32,
    pub pending: u32,
    #[serde(default, rename = "Items")]
    pub items: Vec<NumberValidation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsyncBatchValidation {
    pub request_uuid: String,
}

#[derive(Debug, Clone, Serialize)]
struct BatchRequest<'a> {
    phone_numbers: &'a [String],
    r#async: bool,
    r#type: &'a str,
}

/// Number validation endpoints.
#[derive(Debug, Clone)]
pub struct Numbers {
    transport: Transport,
}

impl Numbers {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// `GET /v1/validation`: validate one number.
    pub async fn validate(&self, number: &str, validation_type: &str) -> Result<NumberValidation> {
        let path = path_with_query(
            "/v1/validation",
            &[("phone_number", number), ("type", validation_type)],
        )?;
        self.transport.get(&path).await
    }

    /// `POST /v1/validation`: validate a batch synchronously.
    pub async fn validate_batch(
        &self,
        numbers: &[String],
        validation_type: &str,
    ) -> Result<BatchValidation> {
        self.transport
            .post(
                "/v1/validation",
                &BatchRequest {
                    phone_numbers: numbers,
                    r#async: false,
                    r#type: validation_type,
                },
            )
            .await
    }

    /// `POST /v1/validation` with `async: true`: queue a batch and get a
    /// request id for later retrieval.
    pub async fn validate_batch_async(
        &self,
        numbers: &[String],
        validation_type: &str,
    ) -> Result<AsyncBatchValidation> {
        self.transport
            .post(
                "/v1/validation",
                &BatchRequest {
                    phone_numbers: numbers,
                    r#async: true,
                    r#type: validation_type,
                },
            )
            .await
    }

    /// `GET /v1/validation/{uuid}`: result of a queued batch.
    pub async fn result(&self, request_uuid: &str) -> Result<BatchValidation> {
        self.transport
            .get(&format!("/v1/validation/{request_uuid}"))
            .await
    }
}
