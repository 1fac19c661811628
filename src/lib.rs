#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]

//! Client for the Wavix telephony platform: voice calls, SMS/MMS, number
//! management, billing, 2FA, speech analytics and the live call-event feed.
//!
//! Every request authenticates with an `appid` query parameter and API errors
//! are normalized into [`Error::Api`] no matter which status code they arrive
//! with. Request fields with known constraints are checked locally before any
//! network traffic; see [`error::ValidationError`].
//!
//! ```no_run
//! use wavix::{ClientOptions, WavixClient};
//!
//! # async fn run() -> wavix::Result<()> {
//! let mut client = WavixClient::new(ClientOptions::new("my-app-id"))?;
//!
//! let settings = client.profile.account_settings().await?;
//! println!("balance: {}", settings.balance);
//!
//! client.calls.on_event(|event| {
//!     println!("{:?} {}", event.event_type, event.uuid);
//! });
//! client.calls.connect().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod services;
mod transport;
mod validate;

pub use config::{ClientOptions, DEFAULT_BASE_URL};
pub use error::{ApiError, Error, Result, StartCallError, ValidationError};
pub use events::{
    CallEvent, CallEventPayload, DigitsAndReason, EventType, InCallEventData, PlaybackRef,
};
pub use transport::{Ack, Paginated, Pagination, UploadFile};

use services::billing::Billing;
use services::buy::Buy;
use services::calls::Calls;
use services::cart::Cart;
use services::cdr::Cdrs;
use services::dids::Dids;
use services::e911::E911;
use services::links::Links;
use services::numbers::Numbers;
use services::profile::Profile;
use services::sip_trunks::SipTrunks;
use services::sms::Sms;
use services::speech::Speech;
use services::two_fa::TwoFa;
use services::voice_campaigns::VoiceCampaigns;
use transport::Transport;

/// Entry point: one service handle per API resource, all sharing a single
/// HTTP client and credential.
#[must_use]
pub struct WavixClient {
    pub calls: Calls,
    pub sms: Sms,
    pub billing: Billing,
    pub cart: Cart,
    pub buy: Buy,
    pub cdrs: Cdrs,
    pub dids: Dids,
    pub e911: E911,
    pub links: Links,
    pub numbers: Numbers,
    pub profile: Profile,
    pub sip_trunks: SipTrunks,
    pub speech: Speech,
    pub two_fa: TwoFa,
    pub voice_campaigns: VoiceCampaigns,
}

impl WavixClient {
    /// Build a client from the given options.
    ///
    /// # Errors
    /// Returns an error if the base URL does not parse or the HTTP client
    /// cannot be constructed.
    pub fn new(options: ClientOptions) -> Result<Self> {
        let base_url = options.resolved_base_url().to_owned();
        let transport = Transport::new(&base_url, options.app_id)?;
        Ok(Self {
            calls: Calls::new(transport.clone()),
            sms: Sms::new(transport.clone()),
            billing: Billing::new(transport.clone()),
            cart: Cart::new(transport.clone()),
            buy: Buy::new(transport.clone()),
            cdrs: Cdrs::new(transport.clone()),
            dids: Dids::new(transport.clone()),
            e911: E911::new(transport.clone()),
            links: Links::new(transport.clone()),
            numbers: Numbers::new(transport.clone()),
            profile: Profile::new(transport.clone()),
            sip_trunks: SipTrunks::new(transport.clone()),
            speech: Speech::new(transport.clone()),
            two_fa: TwoFa::new(transport.clone()),
            voice_campaigns: VoiceCampaigns::new(transport),
        })
    }
}
