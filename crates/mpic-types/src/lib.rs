//! Wire types for Multi-Perspective Issuance Corroboration (MPIC).
//!
//! This crate defines the request/response envelopes exchanged between a
//! certificate authority's MPIC coordinator and the outer world, plus the
//! per-perspective check request/response shapes used internally between the
//! coordinator and its CAA/DCV checkers. Every type here is a plain data
//! carrier: no networking, no DNS, no HTTP. See `mpic-caa`, `mpic-dcv`,
//! `mpic-cohort`, and `mpic-coordinator` for the components that operate on
//! these types.

mod check_request;
mod check_response;
mod error;
mod mpic_request;
mod mpic_response;
mod perspective;

pub use check_request::{
    CaaCheckParameters, CheckRequest, CheckType, DcvCheckParameters, DcvValidationMethod,
    DnsRecordType,
};
pub use check_response::{
    CaaCheckDetails, CheckDetails, CheckResponse, DnsCheckDetails, HttpCheckDetails,
    HttpRedirectHop,
};
pub use error::{error_type, MpicRequestValidationError, MpicValidationError, RequestValidationIssue};
pub use mpic_request::{MpicRequest, MpicRequestParameters, OrchestrationParameters};
pub use mpic_response::{ActualOrchestrationParameters, MpicResponse};
pub use perspective::Perspective;
