use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine};
use mpic_resolver::HttpFetcher;
use mpic_types::{DcvCheckParameters, DcvValidationMethod, HttpCheckDetails, MpicValidationError};
use regex::Regex;

use crate::error::{DcvCheckError, Result};

const WELL_KNOWN_PKI_PATH: &str = ".well-known/pki-validation";
const WELL_KNOWN_ACME_PATH: &str = ".well-known/acme-challenge";

fn build_url(method: DcvValidationMethod, target: &str, params: &DcvCheckParameters) -> String {
    match method {
        DcvValidationMethod::WebsiteChange => {
            let scheme = params.url_scheme.as_deref().unwrap_or("http");
            let path = params.http_token_path.as_deref().unwrap_or("");
            format!("{scheme}://{target}/{WELL_KNOWN_PKI_PATH}/{path}")
        }
        DcvValidationMethod::AcmeHttp01 => {
            let token = params.token.as_deref().unwrap_or("");
            format!("http://{target}/{WELL_KNOWN_ACME_PATH}/{token}")
        }
        other => unreachable!("{other:?} is not an HTTP-based DCV method"),
    }
}

fn expected_content<'a>(method: DcvValidationMethod, params: &'a DcvCheckParameters) -> &'a str {
    match method {
        DcvValidationMethod::AcmeHttp01 => params.key_authorization.as_deref().unwrap_or(""),
        DcvValidationMethod::WebsiteChange => params.challenge_value.as_deref().unwrap_or(""),
        other => unreachable!("{other:?} is not an HTTP-based DCV method"),
    }
}

/// Decode a response body per its declared `Content-Type` charset, falling
/// back to UTF-8 when no charset is declared or the declared one is
/// unrecognized.
fn decode_body(bytes: &[u8], content_type: Option<&str>) -> String {
    let encoding = content_type
        .and_then(|ct| ct.parse::<mime::Mime>().ok())
        .and_then(|m| m.get_param(mime::CHARSET).map(|c| c.as_str().to_string()))
        .and_then(|charset| encoding_rs::Encoding::for_label(charset.as_bytes()))
        .unwrap_or(encoding_rs::UTF_8);
    let (decoded, _, _) = encoding.decode(bytes);
    decoded.into_owned()
}

/// Execute an HTTP-based DCV method (WEBSITE_CHANGE or ACME_HTTP_01) and
/// return `(passed, details)`, or an `errors` set on non-2xx/transport
/// failure handled by the caller.
pub async fn perform_http_based_validation(
    fetcher: &Arc<dyn HttpFetcher>,
    method: DcvValidationMethod,
    target: &str,
    params: &DcvCheckParameters,
) -> Result<(bool, Vec<MpicValidationError>, HttpCheckDetails)> {
    let url = build_url(method, target, params);
    let expected = expected_content(method, params);
    let max_body_bytes = expected.len().max(100);

    let outcome = fetcher
        .fetch(&url, &params.http_headers, max_body_bytes)
        .await
        .map_err(DcvCheckError::from)?;

    let details = HttpCheckDetails {
        response_status_code: Some(outcome.status_code),
        response_url: Some(outcome.final_url.clone()),
        response_history: outcome.history.clone(),
        response_page: Some(STANDARD.encode(&outcome.response_page_bytes)),
    };

    if outcome.status_code != 200 {
        let error = MpicValidationError::new(
            outcome.status_code.to_string(),
            format!("unexpected HTTP status {}", outcome.status_code),
        );
        return Ok((false, vec![error], details));
    }

    let body = decode_body(&outcome.response_page_bytes, outcome.content_type.as_deref());
    let stripped = body.trim();

    let passed = match method {
        DcvValidationMethod::AcmeHttp01 => stripped == expected,
        DcvValidationMethod::WebsiteChange => {
            let contains = stripped.contains(expected);
            let regex_ok = match params.match_regex.as_deref() {
                Some(pattern) if !pattern.is_empty() => {
                    let re = Regex::new(pattern)
                        .map_err(|_| DcvCheckError::InvalidMatchRegex(pattern.to_string()))?;
                    re.is_match(stripped)
                }
                _ => true,
            };
            contains && regex_ok
        }
        other => unreachable!("{other:?} is not an HTTP-based DCV method"),
    };

    Ok((passed, Vec::new(), details))
}
