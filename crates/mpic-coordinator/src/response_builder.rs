use mpic_types::{
    ActualOrchestrationParameters, CheckResponse, MpicRequestParameters, MpicResponse,
    OrchestrationParameters,
};

/// Assemble the outward `MpicResponse` from the final attempt's state. Pure
/// function: no I/O, no clock reads (the per-check timestamps are already
/// baked into each `CheckResponse`).
#[allow(clippy::too_many_arguments)]
pub fn build_response(
    target: String,
    trace_identifier: Option<String>,
    parameters: MpicRequestParameters,
    request_orchestration_parameters: OrchestrationParameters,
    quorum_count: u32,
    attempt_count: u32,
    final_attempt_responses: Vec<CheckResponse>,
    is_valid: bool,
    previous_attempt_results: Vec<Vec<CheckResponse>>,
) -> MpicResponse {
    MpicResponse {
        target,
        trace_identifier,
        is_valid,
        actual_orchestration_parameters: ActualOrchestrationParameters {
            perspective_count: final_attempt_responses.len() as u32,
            quorum_count,
            attempt_count,
        },
        perspectives: final_attempt_responses,
        request_orchestration_parameters,
        previous_attempt_results: if previous_attempt_results.is_empty() {
            None
        } else {
            Some(previous_attempt_results)
        },
        parameters,
    }
}
