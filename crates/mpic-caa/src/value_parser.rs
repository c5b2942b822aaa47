use crate::error::CaaValueParseError;

/// A parsed CAA value: the issuer domain (possibly empty, meaning "no issuer
/// permitted") plus any `tag=value` parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaaIssuerValue {
    pub domain: String,
    pub params: Vec<(String, String)>,
}

fn is_label_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

/// `[A-Za-z0-9]+(-*[A-Za-z0-9]+)*` — shared by CAA parameter tags and domain
/// labels.
fn matches_label_grammar(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    let chars: Vec<char> = s.chars().collect();
    let mut i = 0;
    // must start with an alphanumeric run
    let start = i;
    while i < chars.len() && is_label_char(chars[i]) {
        i += 1;
    }
    if i == start {
        return false;
    }
    while i < chars.len() {
        // zero or more '-', then at least one alphanumeric run
        while i < chars.len() && chars[i] == '-' {
            i += 1;
        }
        let run_start = i;
        while i < chars.len() && is_label_char(chars[i]) {
            i += 1;
        }
        if i == run_start {
            return false;
        }
    }
    true
}

fn matches_domain_grammar(domain: &str) -> bool {
    if domain.is_empty() {
        // empty domain name is valid for CAA: denotes "no issuer permitted"
        return true;
    }
    domain.split('.').all(matches_label_grammar)
}

fn is_valid_param_value_char(c: char) -> bool {
    let b = c as u32;
    (0x21..=0x7E).contains(&b) && c != ';'
}

/// Parse a CAA record value into its issuer domain and parameters, per the
/// grammar `issuer-domain [ ";" tag "=" value ]*`.
pub fn extract_domain_and_parameters_from_caa_value(
    value: &str,
) -> Result<CaaIssuerValue, CaaValueParseError> {
    let mut segments = value.split(';');
    let domain = segments.next().unwrap_or("").trim().to_string();

    if !matches_domain_grammar(&domain) {
        return Err(CaaValueParseError {
            value: value.to_string(),
            reason: format!("issuer domain {domain:?} does not match the CAA label grammar"),
        });
    }

    let mut params = Vec::new();
    for raw_param in segments {
        let param = raw_param.trim();
        if param.is_empty() {
            continue;
        }
        let (tag, param_value) = param.split_once('=').ok_or_else(|| CaaValueParseError {
            value: value.to_string(),
            reason: format!("parameter {param:?} is missing '='"),
        })?;
        if !matches_label_grammar(tag) {
            return Err(CaaValueParseError {
                value: value.to_string(),
                reason: format!("parameter tag {tag:?} does not match the CAA tag grammar"),
            });
        }
        if !param_value.chars().all(is_valid_param_value_char) {
            return Err(CaaValueParseError {
                value: value.to_string(),
                reason: format!("parameter value {param_value:?} contains disallowed characters"),
            });
        }
        params.push((tag.to_string(), param_value.to_string()));
    }

    Ok(CaaIssuerValue { domain, params })
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---------------------------------------------------------------
    // UNIT TESTS
    // ---------------------------------------------------------------

    #[test]
    fn parses_bare_issuer_domain() {
        let parsed = extract_domain_and_parameters_from_caa_value("my-ca.com").unwrap();
        assert_eq!(parsed.domain, "my-ca.com");
        assert!(parsed.params.is_empty());
    }

    #[test]
    fn parses_issuer_domain_with_parameters() {
        let parsed =
            extract_domain_and_parameters_from_caa_value("my-ca.com; account=12345; policy=ev")
                .unwrap();
        assert_eq!(parsed.domain, "my-ca.com");
        assert_eq!(
            parsed.params,
            vec![
                ("account".to_string(), "12345".to_string()),
                ("policy".to_string(), "ev".to_string()),
            ]
        );
    }

    #[test]
    fn empty_domain_is_legal_and_means_no_issuer_permitted() {
        let parsed = extract_domain_and_parameters_from_caa_value("").unwrap();
        assert_eq!(parsed.domain, "");
    }

    #[test]
    fn empty_domain_with_trailing_params_is_legal() {
        let parsed = extract_domain_and_parameters_from_caa_value(";account=1").unwrap();
        assert_eq!(parsed.domain, "");
        assert_eq!(parsed.params, vec![("account".to_string(), "1".to_string())]);
    }

    #[test]
    fn rejects_domain_with_invalid_label() {
        let err = extract_domain_and_parameters_from_caa_value("-bad-.com").unwrap_err();
        assert!(err.reason.contains("label grammar"));
    }

    #[test]
    fn rejects_param_without_equals() {
        let err = extract_domain_and_parameters_from_caa_value("my-ca.com;malformed").unwrap_err();
        assert!(err.reason.contains("missing '='"));
    }

    #[test]
    fn rejects_param_value_with_control_characters() {
        let err =
            extract_domain_and_parameters_from_caa_value("my-ca.com;account=bad\tvalue").unwrap_err();
        assert!(err.reason.contains("disallowed characters"));
    }
}
