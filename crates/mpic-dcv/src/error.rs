use thiserror::Error;

pub type Result<T> = std::result::Result<T, DcvCheckError>;

#[derive(Error, Debug)]
pub enum DcvCheckError {
    #[error("DNS lookup failed: {0}")]
    Dns(#[from] mpic_resolver::ResolverError),

    #[error("target could not be encoded for lookup: {0}")]
    Encoding(#[from] mpic_domain_encoder::DomainEncodingError),

    #[error("challenge regex {0:?} is invalid")]
    InvalidMatchRegex(String),
}

impl DcvCheckError {
    pub fn error_code(&self) -> &'static str {
        match self {
            DcvCheckError::Dns(inner) => inner.error_code(),
            DcvCheckError::Encoding(_) => "target_encoding_error",
            DcvCheckError::InvalidMatchRegex(_) => "invalid_match_regex",
        }
    }
}
