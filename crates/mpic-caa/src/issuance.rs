use mpic_resolver::CaaRecord;
use tracing::warn;

use crate::value_parser::extract_domain_and_parameters_from_caa_value;

const ISSUE_TAG: &str = "issue";
const ISSUEWILD_TAG: &str = "issuewild";

/// Tags whose critical bit does not force denial even when the tag is
/// otherwise unrecognized (§4.2, §9).
const CRITICAL_FLAG_ALLOW_LIST: [&str; 4] = ["contactemail", "contactphone", "issuemail", "iodef"];

/// Apply the BR issuance rule to a CAA record set found at some node in the
/// DNS tree. `records` is empty both when no CAA record set exists anywhere
/// along the walk and when the node answered with a record set that happens
/// to contain only other-type records — either way, absence of `issue`/
/// `issuewild` tags with no unrecognized critical flags means issuance is
/// allowed.
pub fn is_valid_for_issuance(records: &[CaaRecord], is_wildcard_domain: bool, caa_domains: &[String]) -> bool {
    let has_unknown_critical_flags = records.iter().any(|r| {
        r.is_critical() && !CRITICAL_FLAG_ALLOW_LIST.contains(&r.tag.as_str())
    });
    if has_unknown_critical_flags {
        return false;
    }

    let issue_wild_values: Vec<&str> = records
        .iter()
        .filter(|r| r.tag == ISSUEWILD_TAG)
        .map(|r| r.value.as_str())
        .collect();
    let issue_values: Vec<&str> = records
        .iter()
        .filter(|r| r.tag == ISSUE_TAG)
        .map(|r| r.value.as_str())
        .collect();

    if is_wildcard_domain && !issue_wild_values.is_empty() {
        do_caa_values_permit_issuance(&issue_wild_values, caa_domains)
    } else if !issue_values.is_empty() {
        do_caa_values_permit_issuance(&issue_values, caa_domains)
    } else {
        true
    }
}

fn do_caa_values_permit_issuance(values: &[&str], caa_domains: &[String]) -> bool {
    for value in values {
        match extract_domain_and_parameters_from_caa_value(value) {
            Ok(parsed) => {
                if caa_domains.iter().any(|d| d == &parsed.domain) {
                    return true;
                }
            }
            Err(err) => {
                warn!(value = %value, reason = %err.reason, "skipping malformed CAA value");
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(flags: u8, tag: &str, value: &str) -> CaaRecord {
        CaaRecord {
            flags,
            tag: tag.to_string(),
            value: value.to_string(),
        }
    }

    // ---------------------------------------------------------------
    // UNIT TESTS
    // ---------------------------------------------------------------

    #[test]
    fn no_relevant_tags_allows_issuance() {
        let records = vec![record(0, "iodef", "mailto:admin@example.com")];
        assert!(is_valid_for_issuance(&records, false, &["my-ca.com".into()]));
    }

    #[test]
    fn empty_record_set_allows_issuance() {
        assert!(is_valid_for_issuance(&[], false, &["my-ca.com".into()]));
    }

    #[test]
    fn issue_tag_with_recognized_issuer_allows() {
        let records = vec![record(0, "issue", "my-ca.com")];
        assert!(is_valid_for_issuance(&records, false, &["my-ca.com".into()]));
    }

    #[test]
    fn issue_tag_with_unrecognized_issuer_denies() {
        let records = vec![record(0, "issue", "other-ca.com")];
        assert!(!is_valid_for_issuance(&records, false, &["my-ca.com".into()]));
    }

    #[test]
    fn wildcard_prefers_issuewild_over_issue() {
        let records = vec![
            record(0, "issue", "other-ca.com"),
            record(0, "issuewild", "my-ca.com"),
        ];
        assert!(is_valid_for_issuance(&records, true, &["my-ca.com".into()]));
    }

    #[test]
    fn wildcard_falls_back_to_issue_when_no_issuewild() {
        let records = vec![record(0, "issue", "my-ca.com")];
        assert!(is_valid_for_issuance(&records, true, &["my-ca.com".into()]));
    }

    #[test]
    fn unrecognized_critical_tag_denies_regardless_of_issue_tags() {
        let records = vec![
            record(0, "issue", "my-ca.com"),
            record(0x80, "unknowntag", "x"),
        ];
        assert!(!is_valid_for_issuance(&records, false, &["my-ca.com".into()]));
    }

    #[test]
    fn critical_bit_on_allow_listed_tag_does_not_deny() {
        let records = vec![
            record(0, "issue", "my-ca.com"),
            record(0x80, "iodef", "mailto:admin@example.com"),
        ];
        assert!(is_valid_for_issuance(&records, false, &["my-ca.com".into()]));
    }

    #[test]
    fn malformed_value_is_skipped_not_fatal() {
        let records = vec![
            record(0, "issue", "-bad-.com"),
            record(0, "issue", "my-ca.com"),
        ];
        assert!(is_valid_for_issuance(&records, false, &["my-ca.com".into()]));
    }
}
