use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckType {
    Caa,
    Dcv,
}

/// The DCV methods this core understands, one per BR/ACME validation family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DcvValidationMethod {
    WebsiteChange,
    AcmeHttp01,
    DnsChange,
    AcmeDns01,
    IpLookup,
    ContactEmail,
    ContactPhone,
}

impl DcvValidationMethod {
    /// Whether this method is satisfied over HTTP rather than DNS.
    pub fn is_http_based(self) -> bool {
        matches!(self, Self::WebsiteChange | Self::AcmeHttp01)
    }
}

/// DNS record types relevant to DCV DNS-based methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DnsRecordType {
    Txt,
    Cname,
    Caa,
    A,
    Aaaa,
}

/// Parameters for a CAA check: the set of issuer domains the requester
/// recognizes as authorized. An absent list means "deny unless the CAA
/// record set is empty or has no relevant tags".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaaCheckParameters {
    #[serde(default)]
    pub caa_domains: Vec<String>,
}

/// Parameters for a DCV check. Field relevance depends on `validation_method`;
/// unused fields for a given method are simply left at their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DcvCheckParameters {
    pub validation_method: Option<DcvValidationMethod>,

    // HTTP-based methods
    #[serde(default)]
    pub http_token_path: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub key_authorization: Option<String>,
    #[serde(default)]
    pub url_scheme: Option<String>,
    #[serde(default)]
    pub http_headers: HashMap<String, String>,

    // Shared / DNS-based methods
    #[serde(default)]
    pub challenge_value: Option<String>,
    #[serde(default)]
    pub match_regex: Option<String>,
    #[serde(default)]
    pub require_exact_match: bool,
    #[serde(default)]
    pub dns_name_prefix: Option<String>,
    #[serde(default)]
    pub dns_record_type: Option<DnsRecordType>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "check_type", rename_all = "lowercase")]
pub enum CheckRequest {
    Caa {
        target: String,
        #[serde(default)]
        caa_check_parameters: CaaCheckParameters,
    },
    Dcv {
        target: String,
        dcv_check_parameters: DcvCheckParameters,
    },
}

impl CheckRequest {
    pub fn target(&self) -> &str {
        match self {
            CheckRequest::Caa { target, .. } => target,
            CheckRequest::Dcv { target, .. } => target,
        }
    }

    pub fn check_type(&self) -> CheckType {
        match self {
            CheckRequest::Caa { .. } => CheckType::Caa,
            CheckRequest::Dcv { .. } => CheckType::Dcv,
        }
    }
}
