//! Short links for SMS campaigns, with click metrics.

use crate::error::Result;
use crate::transport::Transport;
use crate::transport::query::path_with_query;
use crate::validate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricsQuery {
    /// Start date, `YYYY-MM-DD`. Required.
    pub from: String,
    /// End date, `YYYY-MM-DD`. Required.
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utm_campaign: Option<String>,
}

/// One recorded click.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShortLinkMetric {
    pub latitude: f64,
    pub longitude: f64,
    pub operating_system: String,
    pub browser: String,
    pub language: String,
    pub phone: String,
    pub utm_campaign: String,
    pub created_at: String,
    pub user_id: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShortLinkMetrics {
    pub metrics: Vec<ShortLinkMetric>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateShortLinkRequest {
    pub link: String,
    pub expiration_time: String,
    pub fallback_url: String,
    pub phone: String,
    pub utm_campaign: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortLink {
    pub short_link: String,
}

/// Short-link endpoints.
#[derive(Debug, Clone)]
pub struct Links {
    transport: Transport,
}

impl Links {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// `GET /v1/short-links/metrics`: click metrics for a date range.
    pub async fn metrics(&self, query: &MetricsQuery) -> Result<ShortLinkMetrics> {
        validate::date("from", &query.from)?;
        validate::date("to", &query.to)?;
        let path = path_with_query("/v1/short-links/metrics", query)?;
        self.transport.get(&path).await
    }

    /// `POST /v1/short-links`: shorten a link. All fields are required.
    pub async fn create(&self, request: &CreateShortLinkRequest) -> Result<ShortLink> {
        validate::required("link", &request.link)?;
        validate::required("expiration_time", &request.expiration_time)?;
        validate::required("fallback_url", &request.fallback_url)?;
        validate::required("phone", &request.phone)?;
        validate::required("utm_campaign", &request.utm_campaign)?;
        self.transport.post("/v1/short-links", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_query_requires_well_formed_dates() {
        assert!(validate::date("from", "2024-06-01").is_ok());
        assert!(validate::date("from", "June 1st").is_err());
    }

    #[test]
    fn create_request_serializes_all_fields() {
        let request = CreateShortLinkRequest {
            link: "https://example.com/promo".to_owned(),
            expiration_time: "2024-12-31".to_owned(),
            fallback_url: "https://example.com".to_owned(),
            phone: "15551230001".to_owned(),
            utm_campaign: "spring".to_owned(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["link"], "https://example.com/promo");
        assert_eq!(json["utm_campaign"], "spring");
    }
}
