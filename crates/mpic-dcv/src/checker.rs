use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use mpic_resolver::{DnsResolver, HttpFetcher};
use mpic_types::{
    CheckDetails, CheckResponse, DcvCheckParameters, DcvValidationMethod, DnsCheckDetails,
    HttpCheckDetails, MpicValidationError,
};
use tracing::instrument;

use crate::dns_method::perform_general_dns_validation;
use crate::error::DcvCheckError;
use crate::http_method::perform_http_based_validation;

/// Executes a single DCV method for a single perspective against a single
/// target, dispatching to the HTTP or DNS validation path depending on the
/// requested method.
pub struct DcvChecker {
    dns_resolver: Arc<dyn DnsResolver>,
    http_fetcher: Arc<dyn HttpFetcher>,
}

impl DcvChecker {
    pub fn new(dns_resolver: Arc<dyn DnsResolver>, http_fetcher: Arc<dyn HttpFetcher>) -> Self {
        Self {
            dns_resolver,
            http_fetcher,
        }
    }

    #[instrument(skip(self, params), fields(%target, ?method))]
    pub async fn check_dcv(
        &self,
        perspective_code: &str,
        target: &str,
        method: DcvValidationMethod,
        params: &DcvCheckParameters,
    ) -> CheckResponse {
        let now_ns = now_ns();

        let encoded_target = match mpic_domain_encoder::encode_target(target) {
            Ok(t) => t,
            Err(err) => {
                return CheckResponse {
                    perspective_code: perspective_code.to_string(),
                    check_passed: false,
                    errors: vec![MpicValidationError::new(
                        "target_encoding_error",
                        err.to_string(),
                    )],
                    timestamp_ns: now_ns,
                    details: empty_details_for(method),
                };
            }
        };

        if method.is_http_based() {
            match perform_http_based_validation(&self.http_fetcher, method, &encoded_target, params).await {
                Ok((passed, errors, details)) => CheckResponse {
                    perspective_code: perspective_code.to_string(),
                    check_passed: passed,
                    errors,
                    timestamp_ns: now_ns,
                    details: CheckDetails::Http(details),
                },
                Err(err) => self.failure_response(perspective_code, &err, now_ns, method),
            }
        } else {
            match perform_general_dns_validation(self.dns_resolver.as_ref(), method, &encoded_target, params).await
            {
                Ok((passed, details)) => CheckResponse {
                    perspective_code: perspective_code.to_string(),
                    check_passed: passed,
                    errors: Vec::new(),
                    timestamp_ns: now_ns,
                    details: CheckDetails::Dns(details),
                },
                Err(err) => self.failure_response(perspective_code, &err, now_ns, method),
            }
        }
    }

    fn failure_response(
        &self,
        perspective_code: &str,
        err: &DcvCheckError,
        now_ns: u128,
        method: DcvValidationMethod,
    ) -> CheckResponse {
        CheckResponse {
            perspective_code: perspective_code.to_string(),
            check_passed: false,
            errors: vec![MpicValidationError::new(err.error_code(), err.to_string())],
            timestamp_ns: now_ns,
            details: empty_details_for(method),
        }
    }
}

fn empty_details_for(method: DcvValidationMethod) -> CheckDetails {
    if method.is_http_based() {
        CheckDetails::Http(HttpCheckDetails::default())
    } else {
        CheckDetails::Dns(DnsCheckDetails::default())
    }
}

fn now_ns() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos()
}
