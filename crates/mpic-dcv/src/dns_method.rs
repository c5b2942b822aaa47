use mpic_resolver::{resolve_caa_with_tree_walk, DnsRecordSet, DnsResolver};
use mpic_types::{DcvCheckParameters, DcvValidationMethod, DnsCheckDetails, DnsRecordType};

use crate::error::Result;

fn strip_one_quote_pair(s: &str) -> &str {
    let bytes = s.as_bytes();
    if bytes.len() >= 2 && bytes[0] == b'"' && bytes[bytes.len() - 1] == b'"' {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

fn name_to_resolve(target: &str, params: &DcvCheckParameters) -> String {
    match params.dns_name_prefix.as_deref() {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}.{target}"),
        _ => target.to_string(),
    }
}

fn expected_content<'a>(method: DcvValidationMethod, params: &'a DcvCheckParameters) -> &'a str {
    match method {
        DcvValidationMethod::AcmeDns01 => params.key_authorization.as_deref().unwrap_or(""),
        _ => params.challenge_value.as_deref().unwrap_or(""),
    }
}

fn requires_exact_match(method: DcvValidationMethod, params: &DcvCheckParameters) -> bool {
    matches!(method, DcvValidationMethod::AcmeDns01) || params.require_exact_match
}

fn matches_expected(record_type: DnsRecordType, candidate: &str, expected: &str, exact: bool) -> bool {
    let (candidate, expected) = if record_type == DnsRecordType::Cname {
        (candidate.to_ascii_lowercase(), expected.to_ascii_lowercase())
    } else {
        (candidate.to_string(), expected.to_string())
    };
    if exact {
        candidate == expected
    } else {
        candidate.contains(&expected)
    }
}

/// Execute a DNS-based DCV method. Returns `(passed, details)`; resolver
/// errors propagate to the caller, which wraps them into a failed
/// `CheckResponse` (§7).
pub async fn perform_general_dns_validation(
    resolver: &dyn DnsResolver,
    method: DcvValidationMethod,
    target: &str,
    params: &DcvCheckParameters,
) -> Result<(bool, DnsCheckDetails)> {
    let name = name_to_resolve(target, params);
    let record_type = params.dns_record_type.unwrap_or(DnsRecordType::Txt);
    let expected = expected_content(method, params);
    let exact = requires_exact_match(method, params);

    let is_contact_caa_lookup = matches!(
        method,
        DcvValidationMethod::ContactEmail | DcvValidationMethod::ContactPhone
    ) && record_type == DnsRecordType::Caa;

    if is_contact_caa_lookup {
        let outcome = resolve_caa_with_tree_walk(resolver, &name).await?;
        let Some(outcome) = outcome else {
            return Ok((
                false,
                DnsCheckDetails {
                    records_seen: Vec::new(),
                    response_code: Some(0),
                    ad_flag: Some(false),
                    found_at: None,
                },
            ));
        };
        let tag = match method {
            DcvValidationMethod::ContactEmail => "contactemail",
            DcvValidationMethod::ContactPhone => "contactphone",
            _ => unreachable!(),
        };
        let records = match outcome.records {
            DnsRecordSet::Caa(records) => records,
            DnsRecordSet::Generic(_) => Vec::new(),
        };
        let records_seen: Vec<String> = records
            .into_iter()
            .filter(|r| r.tag == tag)
            .map(|r| r.value)
            .collect();
        let passed = records_seen
            .iter()
            .any(|candidate| matches_expected(record_type, candidate, expected, exact));
        return Ok((
            passed,
            DnsCheckDetails {
                records_seen,
                response_code: Some(outcome.response_code),
                ad_flag: Some(outcome.ad_flag),
                found_at: Some(outcome.found_at),
            },
        ));
    }

    let outcome = resolver.resolve_generic(&name, record_type).await?;
    let records = match outcome.records {
        DnsRecordSet::Generic(records) => records,
        DnsRecordSet::Caa(_) => Vec::new(),
    };
    let records_seen: Vec<String> = records
        .into_iter()
        .map(|r| strip_one_quote_pair(&r.rdata_text).to_string())
        .collect();
    let passed = records_seen
        .iter()
        .any(|candidate| matches_expected(record_type, candidate, expected, exact));

    Ok((
        passed,
        DnsCheckDetails {
            records_seen,
            response_code: Some(outcome.response_code),
            ad_flag: Some(outcome.ad_flag),
            found_at: Some(outcome.found_at),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mpic_resolver::mock::MockDnsResolver;
    use mpic_resolver::{CaaRecord, DnsLookupOutcome};

    // ---------------------------------------------------------------
    // UNIT TESTS
    // ---------------------------------------------------------------

    #[test]
    fn strips_exactly_one_enclosing_quote_pair() {
        assert_eq!(strip_one_quote_pair("\"hello\""), "hello");
        assert_eq!(strip_one_quote_pair("hello"), "hello");
        assert_eq!(strip_one_quote_pair("\"\"hello\"\""), "\"hello\"");
    }

    #[test]
    fn name_to_resolve_applies_prefix() {
        let params = DcvCheckParameters {
            dns_name_prefix: Some("_acme-challenge".into()),
            ..Default::default()
        };
        assert_eq!(name_to_resolve("example.com", &params), "_acme-challenge.example.com");
    }

    #[test]
    fn cname_matching_is_case_insensitive() {
        assert!(matches_expected(
            DnsRecordType::Cname,
            "Target.EXAMPLE.com",
            "target.example.com",
            true
        ));
    }

    // ---------------------------------------------------------------
    // INTEGRATION TESTS
    // ---------------------------------------------------------------

    #[tokio::test]
    async fn dns_change_passes_on_exact_txt_match() {
        let resolver = MockDnsResolver::new().with_generic_answer(
            "example.com",
            DnsRecordType::Txt,
            DnsLookupOutcome {
                records: DnsRecordSet::Generic(vec![mpic_resolver::GenericRecord {
                    rdata_text: "\"challenge-value\"".into(),
                }]),
                response_code: 0,
                ad_flag: true,
                found_at: "example.com".into(),
            },
        );
        let params = DcvCheckParameters {
            challenge_value: Some("challenge-value".into()),
            require_exact_match: true,
            dns_record_type: Some(DnsRecordType::Txt),
            ..Default::default()
        };
        let (passed, details) = perform_general_dns_validation(
            &resolver,
            DcvValidationMethod::DnsChange,
            "example.com",
            &params,
        )
        .await
        .unwrap();
        assert!(passed);
        assert!(details.ad_flag.unwrap());
        assert_eq!(details.records_seen, vec!["challenge-value".to_string()]);
    }

    #[tokio::test]
    async fn contact_email_filters_caa_records_by_tag() {
        let records = vec![
            CaaRecord {
                flags: 0,
                tag: "issue".into(),
                value: "my-ca.com".into(),
            },
            CaaRecord {
                flags: 0,
                tag: "contactemail".into(),
                value: "admin@example.com".into(),
            },
        ];
        let resolver = MockDnsResolver::new().with_caa_answer(
            "example.com",
            Some(DnsLookupOutcome {
                records: DnsRecordSet::Caa(records),
                response_code: 0,
                ad_flag: false,
                found_at: "example.com".into(),
            }),
        );
        let params = DcvCheckParameters {
            challenge_value: Some("admin@example.com".into()),
            require_exact_match: true,
            dns_record_type: Some(DnsRecordType::Caa),
            ..Default::default()
        };
        let (passed, details) = perform_general_dns_validation(
            &resolver,
            DcvValidationMethod::ContactEmail,
            "example.com",
            &params,
        )
        .await
        .unwrap();
        assert!(passed);
        assert_eq!(details.records_seen, vec!["admin@example.com".to_string()]);
    }
}
