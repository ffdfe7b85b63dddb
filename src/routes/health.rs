//! Health check endpoints
//!
//! `/health` and `/healthz` are liveness probes: they answer 200 whenever
//! the process is serving, without touching the content backend.

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use serde::Serialize;

use super::json_response;
use crate::server::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub healthy: bool,
    pub version: &'static str,
    /// Current timestamp
    pub timestamp: String,
    pub instance_id: String,
    /// Whether backend responses are being cached
    #[serde(rename = "cacheEnabled")]
    pub cache_enabled: bool,
}

fn build_health_response(state: &AppState) -> HealthResponse {
    HealthResponse {
        healthy: true,
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
        instance_id: state.config.instance_id.to_string(),
        cache_enabled: !state.client.cache().config().revalidate.is_zero(),
    }
}

/// Handle GET /health and /healthz
pub fn health_check(state: &AppState) -> Response<Full<Bytes>> {
    json_response(StatusCode::OK, &build_health_response(state))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_serialization() {
        let health = HealthResponse {
            healthy: true,
            version: "0.1.0",
            timestamp: "2024-05-10T00:00:00+00:00".to_string(),
            instance_id: "test-instance".to_string(),
            cache_enabled: true,
        };
        let json = serde_json::to_string(&health).unwrap();
        assert!(json.contains("\"healthy\":true"));
        assert!(json.contains("\"cacheEnabled\":true"));
        assert!(json.contains("test-instance"));
    }
}
