use thiserror::Error;

pub type Result<T> = std::result::Result<T, CaaCheckError>;

#[derive(Error, Debug)]
pub enum CaaCheckError {
    #[error("CAA lookup failed: {0}")]
    Lookup(#[from] mpic_resolver::ResolverError),
}

impl CaaCheckError {
    pub fn error_code(&self) -> &'static str {
        match self {
            CaaCheckError::Lookup(_) => mpic_types::error_type::CAA_LOOKUP_ERROR,
        }
    }
}

/// A CAA value that failed to parse against the RFC 8659 grammar. Malformed
/// values are never fatal to the overall check; they are logged and skipped
/// (§4.2): a record set where one value is malformed and another permits
/// issuance still issues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed CAA value {value:?}: {reason}")]
pub struct CaaValueParseError {
    pub value: String,
    pub reason: String,
}
