//! Shopping cart for DID purchases.

use crate::error::Result;
use crate::transport::{Ack, Transport};
use serde::{Deserialize, Serialize};

/// A DID as offered in the store and held in the cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartDid {
    pub id: i64,
    pub activation_fee: String,
    pub channels: u32,
    pub city: String,
    pub country: String,
    pub cnam: bool,
    pub country_short_name: String,
    pub free_min: u32,
    pub monthly_fee: String,
    pub number: String,
    pub per_min: String,
    pub require_docs: Vec<String>,
    pub sms_enabled: bool,
    pub sms_price: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocType {
    pub id: i64,
    pub name: String,
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartContent {
    pub dids: Vec<CartDid>,
    pub doc_types: Vec<DocType>,
}

#[derive(Debug, Clone, Serialize)]
struct DidIds<'a> {
    ids: &'a [String],
}

/// Cart endpoints.
#[derive(Debug, Clone)]
pub struct Cart {
    transport: Transport,
}

impl Cart {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// `GET /v1/buy/cart`: current cart contents plus the document types the
    /// selected DIDs may require.
    pub async fn content(&self) -> Result<CartContent> {
        self.transport.get("/v1/buy/cart").await
    }

    /// `PUT /v1/buy/cart`: add DIDs to the cart. Returns the updated DID list.
    pub async fn add_dids(&self, ids: &[String]) -> Result<Vec<CartDid>> {
        self.transport.put("/v1/buy/cart", &DidIds { ids }).await
    }

    /// `POST /v1/buy/cart/checkout`: purchase the listed DIDs.
    pub async fn checkout(&self, ids: &[String]) -> Result<Ack> {
        self.transport
            .post("/v1/buy/cart/checkout", &DidIds { ids })
            .await
    }
}
