//! Owned DID management: routing destinations, documents, stock returns.

use crate::error::Result;
use crate::transport::query::path_with_query;
use crate::transport::{Ack, Paginated, Transport, UploadFile};
use crate::validate;
use serde::{Deserialize, Serialize};

/// Destination transport codes accepted by the API: 1 is a SIP URI, 4 is
/// PSTN, 5 is a SIP trunk.
pub const DESTINATION_TRANSPORTS: &[i64] = &[1, 4, 5];

/// Document type ids: 1 general, 2 address, 3 local address.
pub const DOCUMENT_TYPES: &[i64] = &[1, 2, 3];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DidDestination {
    pub id: i64,
    pub destination: String,
    pub priority: u32,
    pub transport: i64,
    pub trunk_id: i64,
    pub trunk_label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DidDocument {
    pub id: i64,
    pub allow_replace: bool,
    pub did_number: String,
    pub doc_content_type: String,
    pub doc_file_name: String,
    pub doc_type_id: i64,
    pub status: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Did {
    pub id: i64,
    pub activation_fee: String,
    pub added: String,
    pub call_recording_enabled: bool,
    pub channels: u32,
    pub city: String,
    pub cnam: bool,
    pub country: String,
    pub country_short_name: String,
    pub destination: Vec<DidDestination>,
    pub documents: Vec<DidDocument>,
    pub label: String,
    pub monthly_fee: String,
    pub number: String,
    pub paid_until: String,
    pub per_min: String,
    pub require_docs: Vec<String>,
    pub seconds: String,
    pub sms_enabled: bool,
    pub sms_relay_url: String,
    pub status: String,
    pub transcription_enabled: bool,
    pub transcription_threshold: u32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DidsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_present: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DestinationUpdate {
    pub destination: String,
    /// One of [`DESTINATION_TRANSPORTS`].
    pub transport: i64,
    pub trunk_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateDestinationsRequest {
    /// DIDs to update. At least one.
    pub ids: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms_relay_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destinations: Option<Vec<DestinationUpdate>>,
}

#[derive(Debug, Clone, Default)]
pub struct UploadDocumentRequest {
    /// Numbers the document applies to. At least one.
    pub did_ids: Vec<String>,
    /// One of [`DOCUMENT_TYPES`].
    pub doc_id: i64,
    pub file_name: String,
    pub file_data: Vec<u8>,
}

/// DID management endpoints.
#[derive(Debug, Clone)]
pub struct Dids {
    transport: Transport,
}

impl Dids {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// `GET /v1/mydids`: DIDs on the account.
    pub async fn list(&self, query: &DidsQuery) -> Result<Paginated<Did>> {
        let path = path_with_query("/v1/mydids", query)?;
        self.transport.get(&path).await
    }

    /// `POST /v1/mydids/update-destinations`: rewrite routing destinations for
    /// a set of DIDs.
    pub async fn update_destinations(&self, request: &UpdateDestinationsRequest) -> Result<Ack> {
        validate::min_len("ids", &request.ids, 1)?;
        validate::optional_http_url("sms_relay_url", request.sms_relay_url.as_deref())?;
        if let Some(destinations) = &request.destinations {
            validate::min_len("destinations", destinations, 1)?;
            for destination in destinations {
                validate::required("destination", &destination.destination)?;
                validate::one_of_ids("transport", destination.transport, DESTINATION_TRANSPORTS)?;
                validate::required_id("trunk_id", destination.trunk_id)?;
            }
        }
        self.transport
            .post("/v1/mydids/update-destinations", request)
            .await
    }

    /// `POST /v1/mydids/papers`: attach a compliance document to DIDs via
    /// multipart upload.
    pub async fn upload_document(&self, request: UploadDocumentRequest) -> Result<Ack> {
        validate::min_len("did_ids", &request.did_ids, 1)?;
        validate::one_of_ids("doc_id", request.doc_id, DOCUMENT_TYPES)?;
        validate::required("file_name", &request.file_name)?;

        let file = UploadFile {
            field: "doc_attachment".to_owned(),
            file_name: request.file_name,
            data: request.file_data,
        };
        let fields = vec![
            ("did_ids".to_owned(), request.did_ids.join(",")),
            ("doc_id".to_owned(), request.doc_id.to_string()),
        ];
        self.transport.upload("/v1/mydids/papers", file, fields).await
    }

    /// `DELETE /v1/mydids?ids[]=...`: release DIDs back to stock.
    pub async fn return_to_stock(&self, ids: &[String]) -> Result<Ack> {
        validate::min_len("ids", ids, 1)?;
        let query: Vec<(&str, &str)> = ids.iter().map(|id| ("ids[]", id.as_str())).collect();
        let path = path_with_query("/v1/mydids", &query)?;
        self.transport.delete(&path).await
    }
}
