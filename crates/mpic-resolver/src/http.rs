use std::collections::HashMap;

use async_trait::async_trait;
use mpic_types::HttpRedirectHop;

use crate::error::Result;

/// The result of fetching a URL, truncated to at most `max_body_bytes` of
/// body content. `response_page_bytes` is exactly the bytes the checker
/// should match against and base64-encode; it is never re-fetched or
/// re-derived from a separate read.
#[derive(Debug, Clone)]
pub struct HttpFetchOutcome {
    pub status_code: u16,
    pub final_url: String,
    pub history: Vec<HttpRedirectHop>,
    pub response_page_bytes: Vec<u8>,
    /// The raw `Content-Type` response header, if one was sent, so callers
    /// can decode `response_page_bytes` using the declared charset instead
    /// of assuming UTF-8.
    pub content_type: Option<String>,
}

/// Abstraction over HTTP retrieval for the HTTP-based DCV methods. A single
/// long-lived implementation is expected to be shared (via `Arc`) across all
/// checks in a coordinator process; see the shared-resource invariants this
/// trait exists to decouple callers from.
#[async_trait]
pub trait HttpFetcher: Send + Sync {
    async fn fetch(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
        max_body_bytes: usize,
    ) -> Result<HttpFetchOutcome>;
}
