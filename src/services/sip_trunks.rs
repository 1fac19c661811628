//! SIP trunk provisioning.

use crate::error::Result;
use crate::transport::query::path_with_query;
use crate::transport::{Ack, Pagination, Transport};
use crate::validate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRequest {
    pub host: String,
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SipTrunkSummary {
    pub id: i64,
    pub talk_time: u32,
    pub transcription_threshold: u32,
    pub host_request: Option<HostRequest>,
    pub auth_method: String,
    #[serde(rename = "callerid")]
    pub caller_id: String,
    pub charge: String,
    pub label: String,
    pub name: String,
    pub status: String,
    pub transcription_enabled: bool,
    pub multiple_numbers: bool,
    pub passthrough: bool,
    pub machine_detection_enabled: bool,
    pub call_recording_enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowedIp {
    pub id: i64,
    pub ip: String,
}

/// Full trunk configuration as returned by the detail, create and update
/// endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SipTrunkConfiguration {
    pub id: i64,
    pub max_channels: u32,
    pub call_limit: u32,
    pub transcription_threshold: u32,
    pub created_at: String,
    pub name: String,
    #[serde(rename = "callerid")]
    pub caller_id: String,
    pub label: String,
    pub auth_method: String,
    pub host: String,
    pub rewrite_prefix: String,
    pub rewrite_cond: String,
    pub max_call_cost: String,
    pub allowed_ips: Vec<AllowedIp>,
    pub call_restrict: bool,
    pub channels_restrict: bool,
    pub ip_restrict: bool,
    pub cost_limit: bool,
    pub rewrite_enabled: bool,
    pub call_recording_enabled: bool,
    pub machine_detection_enabled: bool,
    #[serde(rename = "didinfo_enabled")]
    pub did_info_enabled: bool,
    pub transcription_enabled: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SipTrunksQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SipTrunksPage {
    pub sip_trunks: Vec<SipTrunkSummary>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SipTrunkRequest {
    pub label: String,
    pub password: String,
    #[serde(rename = "callerid")]
    pub caller_id: String,
    /// Per-call spend cap. Required.
    pub max_call_cost: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub host: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub rewrite_prefix: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub rewrite_cond: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_ips: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_channels: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_limit: Option<u32>,
    pub transcription_threshold: u32,
    pub cost_limit: bool,
    pub ip_restrict: bool,
    pub channels_restrict: bool,
    pub call_restrict: bool,
    #[serde(rename = "didinfo_enabled")]
    pub did_info_enabled: bool,
    pub transcription_enabled: bool,
    pub rewrite_enabled: bool,
    pub machine_detection_enabled: bool,
    pub call_recording_enabled: bool,
}

/// SIP trunk endpoints.
#[derive(Debug, Clone)]
pub struct SipTrunks {
    transport: Transport,
}

impl SipTrunks {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// `GET /v1/trunks`: trunks on the account.
    pub async fn list(&self, query: &SipTrunksQuery) -> Result<SipTrunksPage> {
        let path = path_with_query("/v1/trunks", query)?;
        self.transport.get(&path).await
    }

    /// `GET /v1/trunks/{id}`: full configuration of one trunk.
    pub async fn configuration(&self, trunk_id: i64) -> Result<SipTrunkConfiguration> {
        self.transport.get(&format!("/v1/trunks/{trunk_id}")).await
    }

    /// `POST /v1/trunks`: create a trunk.
    pub async fn create(&self, request: &SipTrunkRequest) -> Result<SipTrunkConfiguration> {
        Self::check(request)?;
        self.transport.post("/v1/trunks", request).await
    }

    /// `PUT /v1/trunks/{id}`: update a trunk.
    pub async fn update(
        &self,
        trunk_id: i64,
        request: &SipTrunkRequest,
    ) -> Result<SipTrunkConfiguration> {
        Self::check(request)?;
        self.transport
            .put(&format!("/v1/trunks/{trunk_id}"), request)
            .await
    }

    /// `DELETE /v1/trunks/{id}`: remove a trunk.
    pub async fn delete(&self, trunk_id: i64) -> Result<Ack> {
        self.transport
            .delete(&format!("/v1/trunks/{trunk_id}"))
            .await
    }

    fn check(request: &SipTrunkRequest) -> Result<()> {
        validate::required("label", &request.label)?;
        validate::required("password", &request.password)?;
        validate::required("callerid", &request.caller_id)?;
        validate::required("max_call_cost", &request.max_call_cost)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_id_uses_the_wire_key() {
        let request = SipTrunkRequest {
            label: "office".to_owned(),
            password: "s3cret".to_owned(),
            caller_id: "15551230001".to_owned(),
            max_call_cost: "1.50".to_owned(),
            ..SipTrunkRequest::default()
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["callerid"], "15551230001");
        assert!(json.get("caller_id").is_none());
        assert!(json.get("host").is_none());
    }

    #[test]
    fn creation_requires_the_core_fields() {
        let request = SipTrunkRequest {
            label: "office".to_owned(),
            password: "s3cret".to_owned(),
            caller_id: "15551230001".to_owned(),
            ..SipTrunkRequest::default()
        };
        let err = SipTrunks::check(&request).unwrap_err();
        assert!(err.to_string().contains("max_call_cost"));
    }
}
