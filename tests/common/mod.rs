// Shared across test targets; not every target uses every helper.
#![allow(dead_code)]

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sitefinder::config::SearchConfig;

pub const SEARCH_PATH: &str = "/customsearch/v1";

/// Configuration pointing at a mock search server, with pacing delays zeroed
/// and a small retry base so tests stay fast.
pub fn test_config(server: &MockServer) -> SearchConfig {
    SearchConfig {
        endpoint: format!("{}{}", server.uri(), SEARCH_PATH),
        api_key: "test-key".to_string(),
        search_engine_id: "test-cx".to_string(),
        search_delay_ms: 0,
        query_delay_ms: 0,
        retry_base_delay_ms: 100,
        ..SearchConfig::default()
    }
}

/// Build a search API payload from (title, link, snippet) triples.
pub fn search_body(items: &[(&str, &str, &str)]) -> serde_json::Value {
    let items: Vec<serde_json::Value> = items
        .iter()
        .map(|(title, link, snippet)| {
            json!({ "title": title, "link": link, "snippet": snippet })
        })
        .collect();
    json!({ "items": items })
}

/// Mock server answering every search query with the same items.
pub async fn mock_search_server(items: &[(&str, &str, &str)]) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body(items)))
        .mount(&server)
        .await;
    server
}

/// Mock server answering every search query with zero items.
pub async fn mock_empty_search_server() -> MockServer {
    mock_search_server(&[]).await
}

/// Mock probe server: every HEAD request gets the given status.
pub async fn mock_probe_server(status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(status))
        .mount(&server)
        .await;
    server
}
