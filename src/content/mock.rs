//! Mock content backend for testing.

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU32, Ordering};

use super::backend::ContentBackend;
use crate::config::API_PATH;
use crate::types::{Result, SiteError};

#[derive(Debug, Clone)]
enum MockResponse {
    Json(Value),
    Status(u16),
}

/// Mock backend for testing.
///
/// Responses are registered by route, the part of the URL after
/// `wp-json/wp/v2/` (for example `posts?slug=assemblea-maig&_embed`).
/// Unregistered routes answer with an empty array, the way the REST API
/// answers a slug filter that matches nothing.
pub struct MockBackend {
    responses: DashMap<String, MockResponse>,
    unreachable: bool,
    call_count: AtomicU32,
}

impl MockBackend {
    /// Create a new mock backend.
    pub fn new() -> Self {
        Self {
            responses: DashMap::new(),
            unreachable: false,
            call_count: AtomicU32::new(0),
        }
    }

    /// Answer `route` with the given JSON body.
    pub fn with_json(self, route: &str, body: Value) -> Self {
        self.responses
            .insert(route.to_string(), MockResponse::Json(body));
        self
    }

    /// Answer `route` with a non-success status.
    pub fn with_status(self, route: &str, status: u16) -> Self {
        self.responses
            .insert(route.to_string(), MockResponse::Status(status));
        self
    }

    /// Fail every request as if the backend were down.
    pub fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    /// Get the number of requests served.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }

    fn route_of(url: &str) -> &str {
        let marker = format!("/{}/", API_PATH);
        match url.find(&marker) {
            Some(idx) => &url[idx + marker.len()..],
            None => url,
        }
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentBackend for MockBackend {
    fn id(&self) -> &str {
        "mock"
    }

    async fn get_json(&self, url: &str) -> Result<Value> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if self.unreachable {
            return Err(SiteError::Unreachable {
                url: url.to_string(),
                reason: "Mock backend disabled".to_string(),
            });
        }

        match self.responses.get(Self::route_of(url)).map(|r| r.clone()) {
            Some(MockResponse::Json(body)) => Ok(body),
            Some(MockResponse::Status(status)) => Err(SiteError::Backend {
                url: url.to_string(),
                status,
            }),
            None => Ok(json!([])),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_registered_route() {
        let backend = MockBackend::new().with_json("posts?per_page=3&_embed", json!([{"id": 1}]));

        let body = backend
            .get_json("http://wp/wp-json/wp/v2/posts?per_page=3&_embed")
            .await
            .unwrap();
        assert_eq!(body, json!([{"id": 1}]));
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn test_unknown_route_is_empty_result() {
        let backend = MockBackend::new();
        let body = backend
            .get_json("http://wp/wp-json/wp/v2/posts?slug=x&_embed")
            .await
            .unwrap();
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_status_and_unreachable() {
        let backend = MockBackend::new().with_status("pages?slug=x&_embed", 500);
        let err = backend
            .get_json("http://wp/wp-json/wp/v2/pages?slug=x&_embed")
            .await
            .unwrap_err();
        assert!(matches!(err, SiteError::Backend { status: 500, .. }));

        let backend = MockBackend::new().unreachable();
        let err = backend.get_json("http://wp/wp-json/wp/v2/posts").await.unwrap_err();
        assert!(matches!(err, SiteError::Unreachable { .. }));
    }
}
