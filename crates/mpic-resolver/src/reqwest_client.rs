use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use bytes::BytesMut;
use futures::StreamExt;
use mpic_types::HttpRedirectHop;
use reqwest::{redirect::Policy, Client};

use crate::error::{Result, ResolverError};
use crate::http::{HttpFetchOutcome, HttpFetcher};

const MAX_REDIRECTS: usize = 10;

/// HTTP retrieval backed by a single pooled `reqwest::Client`, built once
/// per coordinator process and shared via `Arc` (§5 shared-resource model).
///
/// Redirects are followed manually, one hop at a time, rather than through
/// reqwest's built-in redirect policy, so that the full hop-by-hop history
/// can be captured per call without per-request client reconfiguration.
pub struct ReqwestHttpFetcher {
    client: Client,
}

impl ReqwestHttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .redirect(Policy::none())
            .timeout(timeout)
            .build()
            .map_err(ResolverError::from)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpFetcher for ReqwestHttpFetcher {
    async fn fetch(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
        max_body_bytes: usize,
    ) -> Result<HttpFetchOutcome> {
        let mut history = Vec::new();
        let mut current_url = url.to_string();

        loop {
            let mut builder = self.client.get(&current_url);
            for (key, value) in headers {
                builder = builder.header(key, value);
            }
            let response = builder.send().await.map_err(ResolverError::from)?;
            let status = response.status();

            if status.is_redirection() {
                if history.len() >= MAX_REDIRECTS {
                    return Err(ResolverError::Http(format!(
                        "exceeded {MAX_REDIRECTS} redirects fetching {url}"
                    )));
                }
                let location = response
                    .headers()
                    .get(reqwest::header::LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .ok_or_else(|| {
                        ResolverError::Http(format!(
                            "redirect from {current_url} carried no Location header"
                        ))
                    })?
                    .to_string();
                history.push(HttpRedirectHop {
                    status_code: status.as_u16(),
                    url: current_url.clone(),
                });
                current_url = location;
                continue;
            }

            let status_code = status.as_u16();
            let final_url = response.url().to_string();
            let content_type = response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let mut body = BytesMut::with_capacity(max_body_bytes.min(64 * 1024));
            let mut stream = response.bytes_stream();
            while body.len() < max_body_bytes {
                match stream.next().await {
                    Some(Ok(chunk)) => body.extend_from_slice(&chunk),
                    Some(Err(err)) => return Err(ResolverError::from(err)),
                    None => break,
                }
            }
            body.truncate(max_body_bytes.min(body.len()));

            return Ok(HttpFetchOutcome {
                status_code,
                final_url,
                history,
                response_page_bytes: body.to_vec(),
                content_type,
            });
        }
    }
}
