//! Transport abstraction for the content backend.
//!
//! `ContentBackend` performs one GET and returns decoded JSON. It knows
//! nothing about caching or record shapes; the client layers those on top.

use async_trait::async_trait;
use reqwest::{header, Client};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::types::{Result, SiteError};

/// Read-only access to the content backend
#[async_trait]
pub trait ContentBackend: Send + Sync {
    /// Backend identifier for logs
    fn id(&self) -> &str;

    /// GET `url` and decode the body as JSON.
    ///
    /// Non-success statuses fail with [`SiteError::Backend`], transport
    /// failures with [`SiteError::Unreachable`].
    async fn get_json(&self, url: &str) -> Result<Value>;
}

/// reqwest-backed implementation against the public REST API
pub struct HttpBackend {
    client: Client,
    origin: String,
}

impl HttpBackend {
    /// Create a backend for the given origin with a request timeout
    pub fn new(origin: impl Into<String>, timeout: Duration) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(concat!("igualitaria/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| SiteError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            origin: origin.into(),
        })
    }
}

#[async_trait]
impl ContentBackend for HttpBackend {
    fn id(&self) -> &str {
        &self.origin
    }

    async fn get_json(&self, url: &str) -> Result<Value> {
        debug!(url = url, "Backend GET");

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(url = url, error = %e, "Backend unreachable");
            SiteError::Unreachable {
                url: url.to_string(),
                reason: e.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = url, status = status.as_u16(), "Backend returned error status");
            return Err(SiteError::Backend {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| SiteError::Decode(format!("Invalid JSON from {}: {}", url, e)))
    }
}
