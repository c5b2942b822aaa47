use std::collections::HashSet;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use futures::future::join_all;
use mpic_types::{
    error_type, CheckDetails, CheckRequest, CheckResponse, MpicRequest, MpicRequestParameters,
    MpicResponse, MpicValidationError, Perspective,
};
use tracing::{info, instrument, warn};

use crate::config::CoordinatorConfig;
use crate::error::{MpicCoordinatorError, Result};
use crate::remote_caller::RemoteCaller;
use crate::response_builder::build_response;
use crate::validator::validate_orchestration_parameters;

/// Orchestrates one MPIC request end to end: validate, build cohorts,
/// fan out, evaluate quorum, retry across alternate cohorts, and assemble
/// the final response (§4.6).
pub struct Coordinator {
    config: CoordinatorConfig,
    remote_caller: Arc<dyn RemoteCaller>,
}

impl Coordinator {
    pub fn new(config: CoordinatorConfig, remote_caller: Arc<dyn RemoteCaller>) -> Self {
        Self {
            config,
            remote_caller,
        }
    }

    #[instrument(skip(self, request), fields(target = %request.target))]
    pub async fn coordinate_mpic(&self, request: MpicRequest) -> Result<MpicResponse> {
        validate_orchestration_parameters(
            &request.orchestration_parameters,
            self.config.target_perspectives.len(),
        )
        .map_err(MpicCoordinatorError::from)?;

        let perspective_count = request
            .orchestration_parameters
            .perspective_count
            .unwrap_or(self.config.default_perspective_count);

        let quorum_count = request.orchestration_parameters.quorum_count.unwrap_or_else(|| {
            if perspective_count <= 5 {
                perspective_count.saturating_sub(1)
            } else {
                perspective_count.saturating_sub(2)
            }
        });

        let requested_max_attempts = request.orchestration_parameters.max_attempts.unwrap_or(1);
        let max_attempts = match self.config.global_max_attempts {
            Some(global) => requested_max_attempts.min(global),
            None => requested_max_attempts,
        }
        .max(1);

        let cohorts = mpic_cohort::build_cohorts(
            &self.config.target_perspectives,
            perspective_count as usize,
            &self.config.hash_secret,
            &request.target,
        )
        .map_err(MpicCoordinatorError::from)?;

        let check_request = to_check_request(&request.target, &request.parameters);

        let mut previous_attempt_results = Vec::new();
        let mut attempt_count = 0u32;
        let mut final_responses = Vec::new();
        let mut is_valid = false;

        for attempt in 0..max_attempts {
            attempt_count = attempt + 1;
            // Cohorts intentionally repeat once `max_attempts` exceeds the
            // number of distinct cohorts available; see the cyclic retry
            // design note.
            let cohort = &cohorts[attempt as usize % cohorts.len().max(1)];

            let responses = self.dispatch_cohort(cohort, &check_request).await;
            is_valid = evaluate_quorum(cohort, &responses, quorum_count);

            info!(
                attempt = attempt_count,
                is_valid,
                cohort_size = cohort.len(),
                "completed MPIC attempt"
            );

            if is_valid || attempt_count == max_attempts {
                final_responses = responses;
                break;
            }
            previous_attempt_results.push(responses);
        }

        Ok(build_response(
            request.target,
            request.trace_identifier,
            request.parameters,
            request.orchestration_parameters,
            quorum_count,
            attempt_count,
            final_responses,
            is_valid,
            previous_attempt_results,
        ))
    }

    async fn dispatch_cohort(
        &self,
        cohort: &[Perspective],
        check_request: &CheckRequest,
    ) -> Vec<CheckResponse> {
        let calls = cohort.iter().map(|perspective| {
            let remote_caller = self.remote_caller.clone();
            let check_request = check_request.clone();
            let perspective = perspective.clone();
            async move {
                match remote_caller.call(&perspective, &check_request).await {
                    Ok(response) => response,
                    Err(err) => {
                        let exception = crate::error::RemoteCheckException {
                            perspective_code: perspective.code.clone(),
                            message: err.to_string(),
                        };
                        warn!(
                            perspective = %exception.perspective_code,
                            error = %exception,
                            "remote perspective call failed"
                        );
                        synthetic_failure(&perspective.code, &check_request, exception.to_string())
                    }
                }
            }
        });
        join_all(calls).await
    }
}

fn synthetic_failure(perspective_code: &str, check_request: &CheckRequest, message: String) -> CheckResponse {
    let details = match check_request {
        CheckRequest::Caa { .. } => CheckDetails::Caa(Default::default()),
        CheckRequest::Dcv { dcv_check_parameters, .. } => {
            if dcv_check_parameters
                .validation_method
                .map(|m| m.is_http_based())
                .unwrap_or(false)
            {
                CheckDetails::Http(Default::default())
            } else {
                CheckDetails::Dns(Default::default())
            }
        }
    };
    CheckResponse::synthetic_failure(
        perspective_code,
        MpicValidationError::new(error_type::COORDINATOR_COMMUNICATION_ERROR, message),
        details,
        now_ns(),
    )
}

/// `valid_count >= quorum_count`, and if the cohort has more than 2 members,
/// the *passing* perspectives must additionally span at least two RIRs
/// (§4.6).
fn evaluate_quorum(cohort: &[Perspective], responses: &[CheckResponse], quorum_count: u32) -> bool {
    let rir_by_code: std::collections::HashMap<&str, &str> = cohort
        .iter()
        .map(|p| (p.code.as_str(), p.rir.as_str()))
        .collect();

    let passing: Vec<&CheckResponse> = responses.iter().filter(|r| r.check_passed).collect();
    let valid_count = passing.len() as u32;
    if valid_count < quorum_count {
        return false;
    }

    if cohort.len() > 2 {
        let distinct_rirs: HashSet<&str> = passing
            .iter()
            .filter_map(|r| rir_by_code.get(r.perspective_code.as_str()).copied())
            .collect();
        distinct_rirs.len() >= 2
    } else {
        true
    }
}

fn to_check_request(target: &str, parameters: &MpicRequestParameters) -> CheckRequest {
    match parameters {
        MpicRequestParameters::Caa { caa_check_parameters } => CheckRequest::Caa {
            target: target.to_string(),
            caa_check_parameters: caa_check_parameters.clone(),
        },
        MpicRequestParameters::Dcv { dcv_check_parameters } => CheckRequest::Dcv {
            target: target.to_string(),
            dcv_check_parameters: dcv_check_parameters.clone(),
        },
    }
}

fn now_ns() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos()
}
