//! Domain Control Validation (DCV): HTTP token retrieval
//! (`.well-known/pki-validation`, `.well-known/acme-challenge`) and
//! DNS-based challenge methods (DNS_CHANGE, ACME_DNS_01, IP_LOOKUP,
//! CONTACT_EMAIL, CONTACT_PHONE), each with the matching semantics its
//! method requires.

mod checker;
mod dns_method;
mod error;
mod http_method;

pub use checker::DcvChecker;
pub use dns_method::perform_general_dns_validation;
pub use error::{DcvCheckError, Result};
pub use http_method::perform_http_based_validation;
