use serde::{Deserialize, Serialize};

use crate::check_response::CheckResponse;
use crate::mpic_request::{MpicRequestParameters, OrchestrationParameters};

/// The orchestration parameters the coordinator actually used, as opposed to
/// what the caller requested (§3 invariant: `perspective_count == len(perspectives)`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActualOrchestrationParameters {
    pub perspective_count: u32,
    pub quorum_count: u32,
    pub attempt_count: u32,
}

/// The top-level response produced by `coordinate_mpic`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MpicResponse {
    pub target: String,
    pub trace_identifier: Option<String>,
    pub is_valid: bool,
    pub perspectives: Vec<CheckResponse>,
    pub request_orchestration_parameters: OrchestrationParameters,
    pub actual_orchestration_parameters: ActualOrchestrationParameters,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_attempt_results: Option<Vec<Vec<CheckResponse>>>,
    #[serde(flatten)]
    pub parameters: MpicRequestParameters,
}
