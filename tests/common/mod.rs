//! Mock HTTP server setup for integration tests

#![allow(dead_code)]

use mockito::{Matcher, Mock, Server, ServerGuard};
use phonetic_dict::{HttpClient, HttpConfig};
use std::sync::Arc;
use std::time::Duration;

/// Test fixture that manages a mock server
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        Self { server, base_url }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// HTTP client with a short timeout so a broken test fails fast.
    pub fn client(&self) -> Arc<HttpClient> {
        Arc::new(
            HttpClient::new(&HttpConfig::default().with_timeout(Duration::from_secs(5)))
                .expect("http client"),
        )
    }

    /// Answers `GET path` with a script that invokes the callback named in the
    /// request's query string with `payload`.
    pub async fn mock_jsonp(
        &mut self,
        path: &str,
        query: Matcher,
        payload: serde_json::Value,
    ) -> Mock {
        self.server
            .mock("GET", path)
            .match_query(Matcher::AllOf(vec![
                Matcher::Regex("callback=CALLBACK[0-9]+".into()),
                query,
            ]))
            .with_status(200)
            .with_header("content-type", "application/javascript")
            .with_body_from_request(move |req| {
                let callback = query_param(req.path_and_query(), "callback").unwrap_or_default();
                format!("{}({});", callback, payload).into_bytes()
            })
            .create_async()
            .await
    }

    /// Create a mock for a JSON error response
    pub async fn mock_error_response(&mut self, method: &str, path: &str, status: usize) -> Mock {
        self.server
            .mock(method, path)
            .match_query(Matcher::Any)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":{"message":"mock failure"}}"#)
            .create_async()
            .await
    }
}

/// Raw (still encoded) value of `key` in a URL or path-and-query string.
pub fn query_param(url: &str, key: &str) -> Option<String> {
    let query = url.split_once('?')?.1;
    query.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        (k == key).then(|| v.to_string())
    })
}
