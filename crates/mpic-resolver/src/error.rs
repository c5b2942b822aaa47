use thiserror::Error;

pub type Result<T> = std::result::Result<T, ResolverError>;

/// Errors surfaced by the DNS and HTTP resolver abstractions.
///
/// `error_code` gives the wire-facing `error_type` string a checker attaches
/// to a failed `CheckResponse`; it intentionally mirrors the exception class
/// names the reference implementation surfaces, without depending on any
/// particular resolver crate's error type at the API boundary.
#[derive(Error, Debug)]
pub enum ResolverError {
    #[error("dns lookup failed: {0}")]
    Dns(String),

    #[error("dns response was malformed: {0}")]
    MalformedResponse(String),

    #[error("http transport error: {0}")]
    Http(String),

    #[error("http request timed out after {0:?}")]
    Timeout(std::time::Duration),
}

impl ResolverError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ResolverError::Dns(_) => "dns_exception",
            ResolverError::MalformedResponse(_) => "dns_malformed_response",
            ResolverError::Http(_) => "http_transport_error",
            ResolverError::Timeout(_) => "http_timeout",
        }
    }
}

impl From<hickory_resolver::error::ResolveError> for ResolverError {
    fn from(err: hickory_resolver::error::ResolveError) -> Self {
        ResolverError::Dns(err.to_string())
    }
}

impl From<reqwest::Error> for ResolverError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ResolverError::Timeout(std::time::Duration::from_secs(30))
        } else {
            ResolverError::Http(err.to_string())
        }
    }
}
