//! One module per API resource. Each service borrows the shared transport
//! and exposes typed operations for its endpoints.

pub mod billing;
pub mod buy;
pub mod calls;
pub mod cart;
pub mod cdr;
pub mod dids;
pub mod e911;
pub mod links;
pub mod numbers;
pub mod profile;
pub mod sip_trunks;
pub mod sms;
pub mod speech;
pub mod two_fa;
pub mod voice_campaigns;
