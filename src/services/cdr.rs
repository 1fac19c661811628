//! Call detail records.

use crate::error::Result;
use crate::transport::query::path_with_query;
use crate::transport::{Paginated, Transport};
use crate::validate;
use serde::{Deserialize, Serialize};

/// Call directions accepted by the `type` filter.
pub const CDR_TYPES: &[&str] = &["placed", "received"];

/// Dispositions accepted by the `disposition` filter.
pub const CDR_DISPOSITIONS: &[&str] = &["answered", "noanswer", "busy", "failed", "all"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cdr {
    pub charge: String,
    pub date: String,
    pub destination: String,
    pub disposition: String,
    pub duration: u32,
    pub forward_fee: String,
    pub from: String,
    pub per_minute: String,
    pub to: String,
    pub uuid: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CdrQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    /// Start date, `YYYY-MM-DD`. Required.
    pub from: String,
    /// End date, `YYYY-MM-DD`. Required.
    pub to: String,
    /// One of [`CDR_TYPES`].
    #[serde(rename = "type")]
    pub kind: String,
    /// One of [`CDR_DISPOSITIONS`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disposition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sip_trunk: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
}

/// CDR endpoints.
#[derive(Debug, Clone)]
pub struct Cdrs {
    transport: Transport,
}

impl Cdrs {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// `GET /v1/cdr`: call records for a date range, filtered by direction.
    pub async fn list(&self, query: &CdrQuery) -> Result<Paginated<Cdr>> {
        validate::date("from", &query.from)?;
        validate::date("to", &query.to)?;
        validate::one_of("type", &query.kind, CDR_TYPES)?;
        if let Some(disposition) = query.disposition.as_deref() {
            validate::one_of("disposition", disposition, CDR_DISPOSITIONS)?;
        }
        let path = path_with_query("/v1/cdr", query)?;
        self.transport.get(&path).await
    }
}
