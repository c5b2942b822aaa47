use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use mpic_resolver::{resolve_caa_with_tree_walk, DnsRecordSet, DnsResolver};
use mpic_types::{CaaCheckDetails, CaaCheckParameters, CheckDetails, CheckResponse, MpicValidationError};
use tracing::instrument;

use crate::error::{CaaCheckError, Result};
use crate::issuance::is_valid_for_issuance;

/// Evaluates CAA records for a single target from a single perspective.
pub struct CaaChecker {
    resolver: Arc<dyn DnsResolver>,
}

impl CaaChecker {
    pub fn new(resolver: Arc<dyn DnsResolver>) -> Self {
        Self { resolver }
    }

    #[instrument(skip(self, params), fields(%target))]
    pub async fn check_caa(
        &self,
        perspective_code: &str,
        target: &str,
        params: &CaaCheckParameters,
    ) -> CheckResponse {
        let now_ns = now_ns();
        match self.check_caa_inner(target, params).await {
            Ok((passed, details)) => CheckResponse {
                perspective_code: perspective_code.to_string(),
                check_passed: passed,
                errors: Vec::new(),
                timestamp_ns: now_ns,
                details: CheckDetails::Caa(details),
            },
            Err(err) => CheckResponse {
                perspective_code: perspective_code.to_string(),
                check_passed: false,
                errors: vec![MpicValidationError::new(err.error_code(), err.to_string())],
                timestamp_ns: now_ns,
                details: CheckDetails::Caa(CaaCheckDetails::default()),
            },
        }
    }

    async fn check_caa_inner(
        &self,
        target: &str,
        params: &CaaCheckParameters,
    ) -> Result<(bool, CaaCheckDetails)> {
        let encoded = mpic_domain_encoder::encode_target(target)
            .map_err(|err| CaaCheckError::Lookup(mpic_resolver::ResolverError::MalformedResponse(err.reason)))?;
        let is_wildcard = encoded.starts_with("*.");
        let lookup_target = encoded.trim_start_matches("*.");

        let outcome = resolve_caa_with_tree_walk(self.resolver.as_ref(), lookup_target)
            .await
            .map_err(CaaCheckError::from)?;

        match outcome {
            None => Ok((
                true,
                CaaCheckDetails {
                    caa_record_present: false,
                    found_at: None,
                    records_seen: Vec::new(),
                },
            )),
            Some(outcome) => {
                let records = match outcome.records {
                    DnsRecordSet::Caa(records) => records,
                    DnsRecordSet::Generic(_) => Vec::new(),
                };
                let records_seen = records
                    .iter()
                    .map(|r| format!("{} {} {:?}", r.flags, r.tag, r.value))
                    .collect();
                let passed = is_valid_for_issuance(&records, is_wildcard, &params.caa_domains);
                Ok((
                    passed,
                    CaaCheckDetails {
                        caa_record_present: !records.is_empty(),
                        found_at: Some(outcome.found_at),
                        records_seen,
                    },
                ))
            }
        }
    }
}

fn now_ns() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mpic_resolver::{mock::MockDnsResolver, CaaRecord, DnsLookupOutcome};
    use mpic_types::error_type;

    fn outcome_with(records: Vec<CaaRecord>, found_at: &str) -> DnsLookupOutcome {
        DnsLookupOutcome {
            records: DnsRecordSet::Caa(records),
            response_code: 0,
            ad_flag: false,
            found_at: found_at.to_string(),
        }
    }

    // ---------------------------------------------------------------
    // INTEGRATION TESTS
    // ---------------------------------------------------------------

    #[tokio::test]
    async fn allows_issuance_when_no_caa_records_present() {
        let resolver = Arc::new(MockDnsResolver::new().with_caa_answer("example.com", None));
        let checker = CaaChecker::new(resolver);
        let response = checker
            .check_caa("us-east-1", "example.com", &CaaCheckParameters::default())
            .await;
        assert!(response.check_passed);
        match response.details {
            CheckDetails::Caa(details) => assert!(!details.caa_record_present),
            _ => panic!("expected CAA details"),
        }
    }

    #[tokio::test]
    async fn denies_issuance_for_unrecognized_issuer() {
        let records = vec![CaaRecord {
            flags: 0,
            tag: "issue".into(),
            value: "other-ca.com".into(),
        }];
        let resolver = Arc::new(
            MockDnsResolver::new().with_caa_answer("example.com", Some(outcome_with(records, "example.com"))),
        );
        let checker = CaaChecker::new(resolver);
        let params = CaaCheckParameters {
            caa_domains: vec!["my-ca.com".into()],
        };
        let response = checker.check_caa("us-east-1", "example.com", &params).await;
        assert!(!response.check_passed);
    }

    #[tokio::test]
    async fn wildcard_target_strips_prefix_before_lookup_and_prefers_issuewild() {
        let records = vec![
            CaaRecord {
                flags: 0,
                tag: "issue".into(),
                value: "other-ca.com".into(),
            },
            CaaRecord {
                flags: 0,
                tag: "issuewild".into(),
                value: "my-ca.com".into(),
            },
        ];
        let resolver = Arc::new(
            MockDnsResolver::new().with_caa_answer("example.com", Some(outcome_with(records, "example.com"))),
        );
        let checker = CaaChecker::new(resolver);
        let params = CaaCheckParameters {
            caa_domains: vec!["my-ca.com".into()],
        };
        let response = checker.check_caa("us-east-1", "*.example.com", &params).await;
        assert!(response.check_passed);
    }

    #[tokio::test]
    async fn resolver_error_surfaces_as_caa_lookup_error() {
        struct AlwaysErrors;
        #[async_trait::async_trait]
        impl DnsResolver for AlwaysErrors {
            async fn resolve_caa(
                &self,
                _name: &str,
            ) -> mpic_resolver::Result<Option<DnsLookupOutcome>> {
                Err(mpic_resolver::ResolverError::Dns("SERVFAIL".into()))
            }
            async fn resolve_generic(
                &self,
                _name: &str,
                _record_type: mpic_types::DnsRecordType,
            ) -> mpic_resolver::Result<DnsLookupOutcome> {
                Err(mpic_resolver::ResolverError::Dns("SERVFAIL".into()))
            }
        }
        let checker = CaaChecker::new(Arc::new(AlwaysErrors));
        let response = checker
            .check_caa("us-east-1", "example.com", &CaaCheckParameters::default())
            .await;
        assert!(!response.check_passed);
        assert_eq!(response.errors[0].error_type, error_type::CAA_LOOKUP_ERROR);
    }
}
