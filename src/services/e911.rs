//! E911 emergency address records.

use crate::error::Result;
use crate::transport::query::path_with_query;
use crate::transport::{Ack, Paginated, Transport};
use crate::validate;
use serde::{Deserialize, Serialize};

/// Civic address attached to an emergency record. Every field is required
/// when creating or validating.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct E911Address {
    pub location: String,
    pub street_number: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub zip_plus_four: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct E911Record {
    pub phone_number: String,
    pub name: String,
    pub address: E911Address,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct E911Query {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressValidation {
    pub status: i32,
    pub number: String,
    pub corrected_address: E911Address,
}

/// E911 endpoints.
#[derive(Debug, Clone)]
pub struct E911 {
    transport: Transport,
}

impl E911 {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// `GET /v1/e911-records`: provisioned emergency records.
    pub async fn list(&self, query: &E911Query) -> Result<Paginated<E911Record>> {
        let path = path_with_query("/v1/e911-records", query)?;
        self.transport.get(&path).await
    }

    /// `POST /v1/e911-records/validate-address`: check an address against the
    /// emergency services database and get the corrected form back.
    pub async fn validate_address(&self, record: &E911Record) -> Result<AddressValidation> {
        Self::check_record(record)?;
        self.transport
            .post("/v1/e911-records/validate-address", record)
            .await
    }

    /// `POST /v1/e911-records`: provision an emergency record for a number.
    pub async fn create(&self, record: &E911Record) -> Result<Ack> {
        Self::check_record(record)?;
        self.transport.post("/v1/e911-records", record).await
    }

    /// `DELETE /v1/e911-records?phone_number=...`: remove the record for a
    /// number.
    pub async fn delete(&self, phone_number: &str) -> Result<Ack> {
        validate::required("phone_number", phone_number)?;
        let path = path_with_query("/v1/e911-records", &[("phone_number", phone_number)])?;
        self.transport.delete(&path).await
    }

    fn check_record(record: &E911Record) -> Result<()> {
        validate::required("phone_number", &record.phone_number)?;
        validate::required("name", &record.name)?;
        let address = &record.address;
        validate::required("location", &address.location)?;
        validate::required("street_number", &address.street_number)?;
        validate::required("street", &address.street)?;
        validate::required("city", &address.city)?;
        validate::required("state", &address.state)?;
        validate::required("zip_code", &address.zip_code)?;
        validate::required("zip_plus_four", &address.zip_plus_four)?;
        Ok(())
    }
}
