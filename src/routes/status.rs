//! Status endpoint
//!
//! Runtime information: instance, backend origin and cache statistics.

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use serde::Serialize;

use super::json_response;
use crate::cache::CacheStats;
use crate::server::AppState;

/// Status response payload
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub instance_id: String,
    /// Content backend origin
    pub backend: String,
    /// Public site origin
    pub site_url: String,
    pub warm_cache: bool,
    pub revalidate_secs: u64,
    pub cache: CacheStats,
    /// Cache hit rate in percent
    pub hit_rate: f64,
}

/// Handle GET /status
pub fn status_check(state: &AppState) -> Response<Full<Bytes>> {
    let cache = state.client.cache();
    let stats = cache.stats();

    let status = StatusResponse {
        service: "igualitaria",
        version: env!("CARGO_PKG_VERSION"),
        instance_id: state.config.instance_id.to_string(),
        backend: state.config.backend_origin.clone(),
        site_url: state.config.site_url.clone(),
        warm_cache: state.config.warm_cache,
        revalidate_secs: cache.config().revalidate.as_secs(),
        hit_rate: stats.hit_rate(),
        cache: stats,
    };

    json_response(StatusCode::OK, &status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization() {
        let status = StatusResponse {
            service: "igualitaria",
            version: "0.1.0",
            instance_id: "test-instance".to_string(),
            backend: "https://wp.example".to_string(),
            site_url: "https://laigualitaria.coop".to_string(),
            warm_cache: false,
            revalidate_secs: 60,
            cache: CacheStats {
                entries: 2,
                hits: 3,
                misses: 1,
                evictions: 0,
            },
            hit_rate: 75.0,
        };

        let json = serde_json::to_string(&status).unwrap();
        assert!(json.contains("igualitaria"));
        assert!(json.contains("\"entries\":2"));
        assert!(json.contains("\"hit_rate\":75.0"));
    }
}
