//! Normalizes an MPIC check target into the exact string a DNS resolver or
//! HTTP client should be asked to look up.
//!
//! IP literals pass through unchanged. Domain names are IDN-encoded label by
//! label into A-label (Punycode) form; a leading `*.` wildcard marker is
//! preserved and never itself encoded, so that downstream CAA/DCV checkers
//! can still recognize wildcard targets after encoding.

use std::net::IpAddr;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to encode target {target:?}: {reason}")]
pub struct DomainEncodingError {
    pub target: String,
    pub reason: String,
}

/// Encode `target` for lookup. IP literals are returned unchanged; domain
/// names are converted to A-label form with any leading `*.` preserved.
pub fn encode_target(target: &str) -> Result<String, DomainEncodingError> {
    if target.parse::<IpAddr>().is_ok() {
        return Ok(target.to_string());
    }

    let (prefix, rest) = match target.strip_prefix("*.") {
        Some(rest) => ("*.", rest),
        None => ("", target),
    };

    let encoded = idna::domain_to_ascii(rest).map_err(|err| DomainEncodingError {
        target: target.to_string(),
        reason: err.to_string(),
    })?;

    Ok(format!("{prefix}{encoded}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---------------------------------------------------------------
    // UNIT TESTS
    // ---------------------------------------------------------------

    #[test]
    fn ipv4_literal_passes_through_unchanged() {
        assert_eq!(encode_target("203.0.113.5").unwrap(), "203.0.113.5");
    }

    #[test]
    fn ipv6_literal_passes_through_unchanged() {
        assert_eq!(encode_target("2001:db8::1").unwrap(), "2001:db8::1");
    }

    #[test]
    fn ascii_domain_passes_through_unchanged() {
        assert_eq!(encode_target("example.com").unwrap(), "example.com");
    }

    #[test]
    fn idn_domain_encodes_to_a_label_form() {
        assert_eq!(
            encode_target("bücher.example.de").unwrap(),
            "xn--bcher-kva.example.de"
        );
    }

    #[test]
    fn wildcard_marker_is_preserved_and_not_encoded() {
        assert_eq!(
            encode_target("*.bücher.example.de").unwrap(),
            "*.xn--bcher-kva.example.de"
        );
    }

    #[test]
    fn plain_wildcard_domain_round_trips() {
        assert_eq!(encode_target("*.example.com").unwrap(), "*.example.com");
    }
}
