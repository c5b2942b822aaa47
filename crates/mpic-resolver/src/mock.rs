//! Deterministic test doubles for [`crate::DnsResolver`] and
//! [`crate::HttpFetcher`], in the style of `MockSpfDnsResolver`: a
//! HashMap-backed stand-in configured by the test, not a mocking framework.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use mpic_types::{DnsRecordType, HttpRedirectHop};

use crate::dns::{DnsLookupOutcome, DnsResolver};
use crate::error::{Result, ResolverError};
use crate::http::{HttpFetchOutcome, HttpFetcher};

/// A DNS resolver double keyed by `(name, record_type)` for generic lookups
/// and by `name` alone for CAA lookups (so tree-walk tests can leave
/// intermediate nodes unset, meaning "no answer here").
#[derive(Default)]
pub struct MockDnsResolver {
    caa_answers: Mutex<HashMap<String, Option<DnsLookupOutcome>>>,
    generic_answers: Mutex<HashMap<(String, DnsRecordType), DnsLookupOutcome>>,
}

impl MockDnsResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_caa_answer(self, name: impl Into<String>, outcome: Option<DnsLookupOutcome>) -> Self {
        self.caa_answers.lock().unwrap().insert(name.into(), outcome);
        self
    }

    pub fn with_generic_answer(
        self,
        name: impl Into<String>,
        record_type: DnsRecordType,
        outcome: DnsLookupOutcome,
    ) -> Self {
        self.generic_answers
            .lock()
            .unwrap()
            .insert((name.into(), record_type), outcome);
        self
    }
}

#[async_trait]
impl DnsResolver for MockDnsResolver {
    async fn resolve_caa(&self, name: &str) -> Result<Option<DnsLookupOutcome>> {
        Ok(self
            .caa_answers
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .unwrap_or(None))
    }

    async fn resolve_generic(
        &self,
        name: &str,
        record_type: DnsRecordType,
    ) -> Result<DnsLookupOutcome> {
        self.generic_answers
            .lock()
            .unwrap()
            .get(&(name.to_string(), record_type))
            .cloned()
            .ok_or_else(|| ResolverError::Dns(format!("no mock answer for {name}")))
    }
}

/// An HTTP fetcher double keyed by URL.
#[derive(Default)]
pub struct MockHttpFetcher {
    answers: Mutex<HashMap<String, HttpFetchOutcome>>,
}

impl MockHttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_answer(self, url: impl Into<String>, outcome: HttpFetchOutcome) -> Self {
        self.answers.lock().unwrap().insert(url.into(), outcome);
        self
    }

    pub fn ok_body(
        self,
        url: impl Into<String>,
        body: &[u8],
        max_body_bytes: usize,
        history: Vec<HttpRedirectHop>,
    ) -> Self {
        self.ok_body_with_content_type(url, body, max_body_bytes, history, None)
    }

    pub fn ok_body_with_content_type(
        self,
        url: impl Into<String>,
        body: &[u8],
        max_body_bytes: usize,
        history: Vec<HttpRedirectHop>,
        content_type: Option<&str>,
    ) -> Self {
        let url = url.into();
        let truncated = body[..body.len().min(max_body_bytes)].to_vec();
        self.with_answer(
            url.clone(),
            HttpFetchOutcome {
                status_code: 200,
                final_url: url,
                history,
                response_page_bytes: truncated,
                content_type: content_type.map(str::to_string),
            },
        )
    }
}

#[async_trait]
impl HttpFetcher for MockHttpFetcher {
    async fn fetch(
        &self,
        url: &str,
        _headers: &HashMap<String, String>,
        _max_body_bytes: usize,
    ) -> Result<HttpFetchOutcome> {
        self.answers
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| ResolverError::Http(format!("no mock answer for {url}")))
    }
}
