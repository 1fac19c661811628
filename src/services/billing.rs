//! Account transactions and invoices.

use crate::error::Result;
use crate::transport::query::path_with_query;
use crate::transport::{Pagination, Transport};
use crate::validate;
use serde::{Deserialize, Serialize};

/// Numeric transaction type code.
///
/// The API reports these as plain integers; known codes get named constants
/// but unknown values still decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionType(pub i32);

impl TransactionType {
    pub const ADJUSTMENTS: Self = Self(0);
    pub const DEAL: Self = Self(1);
    pub const ACTIVATION: Self = Self(2);
    pub const MONTH: Self = Self(3);
    pub const ACTIVATION_FEE: Self = Self(4);
    pub const MONTH_FEE: Self = Self(5);
    pub const CALL: Self = Self(6);
    pub const CALL_FEE: Self = Self(7);
    pub const PAYPAL_IN: Self = Self(8);
    pub const PAYPAL_OUT: Self = Self(9);
    pub const TAX: Self = Self(10);
    pub const CALL_FIX_FEE: Self = Self(11);
    pub const WEBCALL: Self = Self(12);
    pub const SIP: Self = Self(14);
    pub const SMS: Self = Self(15);
    pub const CHANNEL: Self = Self(16);
    pub const CHANNEL_FEE: Self = Self(17);
    pub const CALL_SKYPE_FEE: Self = Self(18);
    pub const CC_IN: Self = Self(19);
    pub const PAYMENT_FEE: Self = Self(20);
    pub const CONNECTION: Self = Self(21);
    pub const CONNECTION_FEE: Self = Self(22);
    pub const PORTING: Self = Self(23);
    pub const INBOUND_SMS: Self = Self(24);
    pub const WIRE_TRANSFER: Self = Self(25);
    pub const SUBSCRIPTION: Self = Self(26);
    pub const SURCHARGE: Self = Self(27);
    pub const HLR: Self = Self(28);
    pub const NUMBER_VALIDATION: Self = Self(29);
    pub const CALL_RECORDING: Self = Self(30);
    pub const CALL_RECORDING_STORAGE: Self = Self(31);
    pub const CAMPAIGN_BUILDER_RUN: Self = Self(32);
    pub const VOICEMAIL_DETECTION: Self = Self(33);
    pub const SENDER_ID_DESTINATION_REGISTRATION: Self = Self(34);
    pub const SENDER_ID_DESTINATION_FEE: Self = Self(35);
    pub const TWO_FA_SERVICE: Self = Self(36);
    pub const IVR: Self = Self(37);
    pub const E911_ACTIVATION: Self = Self(38);
    pub const MMS: Self = Self(39);
    pub const INBOUND_MMS: Self = Self(40);
    pub const CALL_TRANSCRIPTION: Self = Self(41);
    pub const TENDLC_BRANDS: Self = Self(42);
    pub const TENDLC_CAMPAIGN_FEE: Self = Self(43);
    pub const DID_ORDER: Self = Self(44);
    pub const ADJUSTMENTS_IN: Self = Self(45);
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TransactionsQuery {
    /// Start date, `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// End date, `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct InvoicesQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub amount: String,
    pub balance_after: String,
    pub date: String,
    pub details: String,
    pub show_invoice: bool,
    pub status: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionsPage {
    pub transactions: Vec<Transaction>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: i64,
    pub amount: String,
    pub from_date: String,
    pub to_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoicesPage {
    pub invoices: Vec<Invoice>,
    pub pagination: Pagination,
}

/// Billing endpoints.
#[derive(Debug, Clone)]
pub struct Billing {
    transport: Transport,
}

impl Billing {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// `GET /v1/billing/transactions`: transaction history, optionally bounded
    /// by a date range.
    pub async fn transactions(&self, query: &TransactionsQuery) -> Result<TransactionsPage> {
        validate::optional_date("from", query.from.as_deref())?;
        validate::optional_date("to", query.to.as_deref())?;
        let path = path_with_query("/v1/billing/transactions", query)?;
        self.transport.get(&path).await
    }

    /// `GET /v1/billing/invoices`: issued invoices.
    pub async fn invoices(&self, query: &InvoicesQuery) -> Result<InvoicesPage> {
        let path = path_with_query("/v1/billing/invoices", query)?;
        self.transport.get(&path).await
    }

    /// `GET /v1/billing/invoices/{id}`: fetch one invoice as a PDF attachment.
    pub async fn download_invoice(&self, invoice_id: i64) -> Result<Vec<u8>> {
        self.transport
            .download(&format!("/v1/billing/invoices/{invoice_id}"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_type_decodes_from_bare_integers() {
        let transaction: Transaction = serde_json::from_str(
            r#"{
                "id": 7,
                "amount": "-0.85",
                "balance_after": "12.15",
                "date": "2024-04-02",
                "details": "Outbound call",
                "show_invoice": false,
                "status": "completed",
                "type": 6
            }"#,
        )
        .unwrap();
        assert_eq!(transaction.kind, TransactionType::CALL);
    }

    #[test]
    fn unknown_transaction_codes_still_decode() {
        let kind: TransactionType = serde_json::from_str("99").unwrap();
        assert_eq!(kind, TransactionType(99));
    }

    #[test]
    fn transactions_query_dates_are_checked() {
        let query = TransactionsQuery {
            from: Some("02-04-2024".to_owned()),
            ..TransactionsQuery::default()
        };
        assert!(validate::optional_date("from", query.from.as_deref()).is_err());
    }
}
