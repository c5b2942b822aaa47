use thiserror::Error;

use mpic_types::MpicRequestValidationError;

pub type Result<T> = std::result::Result<T, MpicCoordinatorError>;

#[derive(Error, Debug)]
pub enum MpicCoordinatorError {
    #[error(transparent)]
    Validation(#[from] MpicRequestValidationError),

    #[error(transparent)]
    Cohort(#[from] mpic_cohort::CohortError),
}

/// Raised internally when a remote-perspective call fails; never escapes
/// the coordinator, which converts it into a synthetic failed
/// `CheckResponse` carrying `COORDINATOR_COMMUNICATION_ERROR` (§4.6, §7).
#[derive(Error, Debug)]
#[error("remote check for perspective {perspective_code} failed: {message}")]
pub struct RemoteCheckException {
    pub perspective_code: String,
    pub message: String,
}
