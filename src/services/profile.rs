//! Account profile and global settings.

use crate::error::Result;
use crate::transport::Transport;
use crate::validate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultDestination {
    pub transport: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub id: i64,
    pub additional_info: String,
    pub attn_contact_name: String,
    pub billing_address: String,
    pub company_name: String,
    pub contact_email: String,
    pub default_destinations: Vec<DefaultDestination>,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub timezone: String,
}

/// Partial profile update. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateCustomerInfoRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attn_contact_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// IANA timezone name, e.g. `Europe/London`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_destinations: Option<Vec<DefaultDestination>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalLimits {
    pub max_call_duration: u32,
    pub max_sip_channels: u32,
    pub max_call_rate: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSettings {
    pub balance: String,
    pub global_limits: GlobalLimits,
}

/// Profile endpoints.
#[derive(Debug, Clone)]
pub struct Profile {
    transport: Transport,
}

impl Profile {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// `GET /v1/profile`: customer contact and billing details.
    pub async fn customer_info(&self) -> Result<CustomerInfo> {
        self.transport.get("/v1/profile").await
    }

    /// `PUT /v1/profile`: update customer details. Returns the full profile
    /// after the change.
    pub async fn update_customer_info(
        &self,
        request: &UpdateCustomerInfoRequest,
    ) -> Result<CustomerInfo> {
        if let Some(email) = request.contact_email.as_deref() {
            if !email.is_empty() {
                validate::email("contact_email", email)?;
            }
        }
        if let Some(timezone) = request.timezone.as_deref() {
            if !timezone.is_empty() {
                validate::timezone("timezone", timezone)?;
            }
        }
        self.transport.put("/v1/profile", request).await
    }

    /// `GET /v1/profile/config`: balance and account-wide limits.
    pub async fn account_settings(&self) -> Result<AccountSettings> {
        self.transport.get("/v1/profile/config").await
    }
}
