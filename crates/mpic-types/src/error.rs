use serde::{Deserialize, Serialize};

/// Well-known `error_type` strings carried on the wire inside a `MpicValidationError`.
///
/// These are not a closed enum because remote perspectives may surface the
/// class name of whatever exception they raised; the coordinator itself only
/// ever emits [`COORDINATOR_COMMUNICATION_ERROR`].
pub mod error_type {
    pub const COORDINATOR_COMMUNICATION_ERROR: &str = "coordinator_communication_error";
    pub const CAA_LOOKUP_ERROR: &str = "caa_lookup_error";
    pub const DNS_LOOKUP_ERROR: &str = "dns_lookup_error";
    pub const HTTP_TRANSPORT_ERROR: &str = "http_transport_error";
    pub const INVALID_REQUEST: &str = "invalid_request";
}

/// A single validation or check-level error surfaced on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MpicValidationError {
    pub error_type: String,
    pub error_message: String,
}

impl MpicValidationError {
    pub fn new(error_type: impl Into<String>, error_message: impl Into<String>) -> Self {
        Self {
            error_type: error_type.into(),
            error_message: error_message.into(),
        }
    }

    pub fn coordinator_communication_error(message: impl Into<String>) -> Self {
        Self::new(error_type::COORDINATOR_COMMUNICATION_ERROR, message)
    }
}

/// A single structural issue found while validating an incoming `MpicRequest`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestValidationIssue {
    pub issue_type: String,
    pub message: String,
}

impl RequestValidationIssue {
    pub fn new(issue_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            issue_type: issue_type.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("request failed validation: {issues:?}")]
pub struct MpicRequestValidationError {
    pub issues: Vec<RequestValidationIssue>,
}

impl MpicRequestValidationError {
    pub fn new(issues: Vec<RequestValidationIssue>) -> Self {
        Self { issues }
    }
}
