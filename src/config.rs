//! Configuration for the site server
//!
//! CLI arguments and environment variable handling using clap. `Args` is the
//! raw surface; `SiteConfig` is the validated form built once at startup and
//! handed to the content client.

use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;
use url::Url;
use uuid::Uuid;

use crate::types::{Result, SiteError};

/// Public origin used when SITE_URL is not set
pub const DEFAULT_SITE_URL: &str = "https://laigualitaria.coop";

/// Path of the WordPress REST API below the backend origin
pub const API_PATH: &str = "wp-json/wp/v2";

/// La Igualitària - economat cooperatiu del Poble-sec
#[derive(Parser, Debug, Clone)]
#[command(name = "igualitaria")]
#[command(about = "Content site server for La Igualitària")]
pub struct Args {
    /// Unique identifier for this server instance
    #[arg(long, env = "INSTANCE_ID", default_value_t = Uuid::new_v4())]
    pub instance_id: Uuid,

    /// Address to listen on
    #[arg(long, env = "LISTEN", default_value = "0.0.0.0:3000")]
    pub listen: SocketAddr,

    /// Origin of the WordPress content backend (required)
    #[arg(long, env = "WP_DOMAIN")]
    pub wp_domain: Option<String>,

    /// Public origin of this site, used for absolute URLs in robots.txt and sitemap.xml
    #[arg(long, env = "SITE_URL")]
    pub site_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log output format (text or json)
    #[arg(long, env = "LOG_FORMAT", default_value = "text")]
    pub log_format: String,

    /// Backend request timeout in milliseconds
    #[arg(long, env = "REQUEST_TIMEOUT_MS", default_value = "10000")]
    pub request_timeout_ms: u64,

    /// Prefetch every post and provider detail in the background at startup
    #[arg(long, env = "WARM_CACHE", default_value = "false")]
    pub warm_cache: bool,
}

/// Validated configuration shared by the content client and the routes
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub instance_id: Uuid,
    pub listen: SocketAddr,
    /// Backend origin without trailing slash
    pub backend_origin: String,
    /// `{backend_origin}/wp-json/wp/v2`
    pub api_url: String,
    /// Public site origin without trailing slash
    pub site_url: String,
    pub request_timeout: Duration,
    pub warm_cache: bool,
}

impl Args {
    /// Whether JSON log output was requested
    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }

    /// Validate configuration
    ///
    /// A missing or unparseable backend origin is fatal: the server must not
    /// bind before this succeeds.
    pub fn validate(&self) -> Result<SiteConfig> {
        let raw = self
            .wp_domain
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| SiteError::Config("WP_DOMAIN is not defined".to_string()))?;

        let backend_origin = parse_origin(raw, "WP_DOMAIN")?;

        let site_url = match self.site_url.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => parse_origin(s, "SITE_URL")?,
            _ => DEFAULT_SITE_URL.to_string(),
        };

        if self.request_timeout_ms == 0 {
            return Err(SiteError::Config(
                "REQUEST_TIMEOUT_MS must be greater than zero".to_string(),
            ));
        }

        Ok(SiteConfig {
            instance_id: self.instance_id,
            listen: self.listen,
            api_url: format!("{}/{}", backend_origin, API_PATH),
            backend_origin,
            site_url,
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            warm_cache: self.warm_cache,
        })
    }
}

impl SiteConfig {
    /// Build a config pointing at the given backend, with defaults elsewhere
    pub fn for_backend(backend_origin: &str) -> Result<Self> {
        let args = Args {
            instance_id: Uuid::new_v4(),
            listen: SocketAddr::from(([127, 0, 0, 1], 0)),
            wp_domain: Some(backend_origin.to_string()),
            site_url: None,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            request_timeout_ms: 10_000,
            warm_cache: false,
        };
        args.validate()
    }

    /// Absolute public URL for a site path such as `/blog`
    pub fn absolute_url(&self, path: &str) -> String {
        if path == "/" || path.is_empty() {
            self.site_url.clone()
        } else {
            format!("{}{}", self.site_url, path)
        }
    }
}

/// Parse an http(s) origin and return it without trailing slash
fn parse_origin(raw: &str, name: &str) -> Result<String> {
    let url = Url::parse(raw)
        .map_err(|e| SiteError::Config(format!("{} is not a valid URL ({}): {}", name, raw, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(SiteError::Config(format!(
            "{} must use http or https, got {}",
            name,
            url.scheme()
        )));
    }

    Ok(raw.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(wp_domain: Option<&str>, site_url: Option<&str>) -> Args {
        Args::parse_from(
            ["igualitaria"]
                .into_iter()
                .map(String::from)
                .chain(wp_domain.map(|d| format!("--wp-domain={}", d)))
                .chain(site_url.map(|s| format!("--site-url={}", s))),
        )
    }

    #[test]
    fn test_missing_backend_origin_is_config_error() {
        let err = args(None, None).validate().unwrap_err();
        assert!(matches!(err, SiteError::Config(_)));
    }

    #[test]
    fn test_blank_backend_origin_is_config_error() {
        let err = args(Some("  "), None).validate().unwrap_err();
        assert!(matches!(err, SiteError::Config(_)));
    }

    #[test]
    fn test_invalid_backend_origin_is_config_error() {
        let err = args(Some("not a url"), None).validate().unwrap_err();
        assert!(matches!(err, SiteError::Config(_)));

        let err = args(Some("ftp://wp.example"), None).validate().unwrap_err();
        assert!(matches!(err, SiteError::Config(_)));
    }

    #[test]
    fn test_api_url_strips_trailing_slash() {
        let config = args(Some("https://wp.example.org/"), None).validate().unwrap();
        assert_eq!(config.backend_origin, "https://wp.example.org");
        assert_eq!(config.api_url, "https://wp.example.org/wp-json/wp/v2");
    }

    #[test]
    fn test_site_url_fallback() {
        let config = args(Some("https://wp.example.org"), None).validate().unwrap();
        assert_eq!(config.site_url, DEFAULT_SITE_URL);

        let config = args(Some("https://wp.example.org"), Some("https://staging.example/"))
            .validate()
            .unwrap();
        assert_eq!(config.site_url, "https://staging.example");
        assert_eq!(config.absolute_url("/blog"), "https://staging.example/blog");
        assert_eq!(config.absolute_url("/"), "https://staging.example");
    }
}
