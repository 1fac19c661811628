//! Voice campaign scenario triggering.

use crate::error::Result;
use crate::transport::Transport;
use crate::validate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize)]
pub struct TriggerScenarioRequest {
    /// Call flow to execute. Required.
    pub callflow_id: i64,
    pub caller_id: String,
    /// Destination number. Required.
    pub contact: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceCampaign {
    pub id: i64,
    pub status: String,
    pub timestamp: String,
    pub caller_id: String,
    pub contact: String,
}

#[derive(Debug, Clone, Serialize)]
struct TriggerBody<'a> {
    voice_campaign: &'a TriggerScenarioRequest,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggeredScenario {
    pub voice_campaign: VoiceCampaign,
}

/// Voice campaign endpoints.
#[derive(Debug, Clone)]
pub struct VoiceCampaigns {
    transport: Transport,
}

impl VoiceCampaigns {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// `POST /v1/voice_campaigns`: run a call flow against one contact.
    pub async fn trigger_scenario(
        &self,
        request: &TriggerScenarioRequest,
    ) -> Result<TriggeredScenario> {
        validate::required_id("callflow_id", request.callflow_id)?;
        validate::required("caller_id", &request.caller_id)?;
        validate::required("contact", &request.contact)?;
        self.transport
            .post(
                "/v1/voice_campaigns",
                &TriggerBody {
                    voice_campaign: request,
                },
            )
            .await
    }
}
