//! Search API client: one bounded-timeout GET per query, rate-limit retry
//! with exponential backoff, and graceful degradation.
//!
//! A query can fail many ways (network, non-2xx status, malformed payload,
//! explicit API error object). Only rate limiting is retried; every other
//! failure degrades to an empty item list so a bad query never aborts a
//! company's resolution.

use rand::Rng;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::SearchConfig;

/// Upper bound the API accepts for the `num` parameter.
const MAX_API_RESULTS: usize = 10;

/// Jitter added on top of each backoff interval (milliseconds).
const RETRY_JITTER_MS: u64 = 500;

/// One raw item from the search API.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SearchItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub snippet: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Error)]
enum QueryError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("rate limited (HTTP {0})")]
    RateLimited(u16),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("API error {code}: {message}")]
    Api { code: i64, message: String },
}

/// Client for the external search API.
pub struct SearchClient {
    client: reqwest::Client,
    config: SearchConfig,
}

impl SearchClient {
    pub fn new(config: SearchConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .expect("Failed to create HTTP client for search");
        Self { client, config }
    }

    /// Execute one query against the search API.
    ///
    /// Returns the raw items on success and an empty list on any
    /// non-retryable failure. HTTP 429/403 responses are retried up to the
    /// configured budget with `base * 2^attempt + jitter` backoff.
    pub async fn execute_query(&self, query: &str) -> Vec<SearchItem> {
        let mut retry_count: u32 = 0;
        loop {
            match self.send(query).await {
                Ok(items) => {
                    debug!("query \"{query}\" returned {} items", items.len());
                    return items;
                }
                Err(QueryError::RateLimited(status)) if retry_count < self.config.max_retries => {
                    let delay = backoff_delay(self.config.retry_base_delay_ms, retry_count);
                    warn!(
                        "rate limited (HTTP {status}) on query \"{query}\", retry {} of {} in {delay:?}",
                        retry_count + 1,
                        self.config.max_retries
                    );
                    sleep(delay).await;
                    retry_count += 1;
                }
                Err(err) => {
                    debug!("query \"{query}\" yielded no results: {err}");
                    return Vec::new();
                }
            }
        }
    }

    async fn send(&self, query: &str) -> Result<Vec<SearchItem>, QueryError> {
        let num = self.config.max_links_per_company.min(MAX_API_RESULTS).to_string();
        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[
                ("key", self.config.api_key.as_str()),
                ("cx", self.config.search_engine_id.as_str()),
                ("q", query),
                ("num", num.as_str()),
                ("gl", "br"),
                ("lr", "lang_pt"),
                ("fields", "items(title,link,snippet),searchInformation"),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::FORBIDDEN {
            return Err(QueryError::RateLimited(status.as_u16()));
        }
        if !status.is_success() {
            return Err(QueryError::Status(status.as_u16()));
        }

        let body: SearchResponse = response.json().await?;
        if let Some(err) = body.error {
            return Err(QueryError::Api { code: err.code, message: err.message });
        }
        Ok(body.items)
    }
}

/// `base * 2^retry_count` plus up to [`RETRY_JITTER_MS`] of random jitter.
fn backoff_delay(base_ms: u64, retry_count: u32) -> Duration {
    let jitter = rand::thread_rng().gen_range(0..RETRY_JITTER_MS);
    Duration::from_millis(base_ms.saturating_mul(1 << retry_count) + jitter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_delay_doubles_per_retry() {
        for (retry, floor) in [(0u32, 1000u64), (1, 2000), (2, 4000)] {
            let delay = backoff_delay(1000, retry);
            assert!(delay >= Duration::from_millis(floor));
            assert!(delay < Duration::from_millis(floor + RETRY_JITTER_MS));
        }
    }

    #[test]
    fn test_response_parses_without_items() {
        let body: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(body.items.is_empty());
        assert!(body.error.is_none());
    }

    #[test]
    fn test_response_parses_error_payload() {
        let body: SearchResponse =
            serde_json::from_str(r#"{"error": {"code": 400, "message": "bad request"}}"#).unwrap();
        let err = body.error.unwrap();
        assert_eq!(err.code, 400);
        assert_eq!(err.message, "bad request");
    }

    #[test]
    fn test_items_parse_with_missing_snippet() {
        let body: SearchResponse = serde_json::from_str(
            r#"{"items": [{"title": "Acme", "link": "https://acme.com.br"}]}"#,
        )
        .unwrap();
        assert_eq!(body.items.len(), 1);
        assert_eq!(body.items[0].snippet, "");
    }
}
