//! CAA (Certification Authority Authorization, RFC 8659) evaluation.
//!
//! [`CaaChecker`] climbs the DNS tree from a target toward the root looking
//! for the first non-empty CAA record set, then applies the Baseline
//! Requirements issuance rule: critical unrecognized tags deny outright;
//! wildcard targets prefer `issuewild` over `issue`; an absent or
//! irrelevant record set allows issuance by default.

mod checker;
mod error;
mod issuance;
mod value_parser;

pub use checker::CaaChecker;
pub use error::{CaaCheckError, CaaValueParseError, Result};
pub use issuance::is_valid_for_issuance;
pub use value_parser::{extract_domain_and_parameters_from_caa_value, CaaIssuerValue};
