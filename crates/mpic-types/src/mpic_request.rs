use serde::{Deserialize, Serialize};

use crate::check_request::{CaaCheckParameters, CheckType, DcvCheckParameters};

/// Caller-supplied overrides for the coordinator's default orchestration
/// behavior. Any field left unset falls back to the coordinator's configured
/// default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestrationParameters {
    #[serde(default)]
    pub perspective_count: Option<u32>,
    #[serde(default)]
    pub quorum_count: Option<u32>,
    #[serde(default)]
    pub max_attempts: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "check_type", rename_all = "lowercase")]
pub enum MpicRequestParameters {
    Caa {
        #[serde(default)]
        caa_check_parameters: CaaCheckParameters,
    },
    Dcv {
        dcv_check_parameters: DcvCheckParameters,
    },
}

impl MpicRequestParameters {
    pub fn check_type(&self) -> CheckType {
        match self {
            MpicRequestParameters::Caa { .. } => CheckType::Caa,
            MpicRequestParameters::Dcv { .. } => CheckType::Dcv,
        }
    }
}

/// The top-level request accepted by the coordinator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MpicRequest {
    pub target: String,
    pub trace_identifier: Option<String>,
    #[serde(default)]
    pub orchestration_parameters: OrchestrationParameters,
    #[serde(flatten)]
    pub parameters: MpicRequestParameters,
}
