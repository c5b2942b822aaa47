use serde::{Deserialize, Serialize};

use crate::error::MpicValidationError;

/// A single redirect hop observed while following an HTTP-based DCV request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpRedirectHop {
    pub status_code: u16,
    pub url: String,
}

/// Details specific to a CAA check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaaCheckDetails {
    pub caa_record_present: bool,
    pub found_at: Option<String>,
    #[serde(default)]
    pub records_seen: Vec<String>,
}

/// Details specific to a DNS-based DCV check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsCheckDetails {
    #[serde(default)]
    pub records_seen: Vec<String>,
    pub response_code: Option<u16>,
    pub ad_flag: Option<bool>,
    pub found_at: Option<String>,
}

/// Details specific to an HTTP-based DCV check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpCheckDetails {
    pub response_status_code: Option<u16>,
    pub response_url: Option<String>,
    #[serde(default)]
    pub response_history: Vec<HttpRedirectHop>,
    /// Base64 of the bytes actually read from the response body (a bounded
    /// prefix, not necessarily the full body).
    pub response_page: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "details_type")]
pub enum CheckDetails {
    Caa(CaaCheckDetails),
    Dns(DnsCheckDetails),
    Http(HttpCheckDetails),
}

/// The outcome of a single check performed by a single perspective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResponse {
    pub perspective_code: String,
    pub check_passed: bool,
    #[serde(default)]
    pub errors: Vec<MpicValidationError>,
    pub timestamp_ns: u128,
    pub details: CheckDetails,
}

impl CheckResponse {
    pub fn synthetic_failure(
        perspective_code: impl Into<String>,
        error: MpicValidationError,
        details: CheckDetails,
        timestamp_ns: u128,
    ) -> Self {
        Self {
            perspective_code: perspective_code.into(),
            check_passed: false,
            errors: vec![error],
            timestamp_ns,
            details,
        }
    }
}
