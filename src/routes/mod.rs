//! HTTP routes for the site
//!
//! `dispatch` maps a method, path and query string to a response. It never
//! fails: content errors become the not-found or failure page.

pub mod directory;
pub mod documents;
pub mod health;
pub mod pages;
pub mod status;

pub use directory::{directory_json, directory_page};
pub use documents::{robots, sitemap};
pub use health::health_check;
pub use status::status_check;

use bytes::Bytes;
use http_body_util::Full;
use hyper::header::{HeaderValue, ALLOW, CONTENT_TYPE};
use hyper::{Method, Response, StatusCode};
use tracing::{error, warn};

use crate::server::AppState;
use crate::site::{BLOG_PREFIX, PROVIDERS_PREFIX};
use crate::types::SiteError;

pub const HTML: &str = "text/html; charset=utf-8";
pub const TEXT: &str = "text/plain; charset=utf-8";
pub const XML: &str = "application/xml; charset=utf-8";
pub const JSON: &str = "application/json";

/// Route a request to its handler
pub async fn dispatch(
    state: &AppState,
    method: &Method,
    path: &str,
    query: Option<&str>,
) -> Response<Full<Bytes>> {
    if *method != Method::GET {
        let mut response = respond(StatusCode::METHOD_NOT_ALLOWED, TEXT, "Method Not Allowed");
        response.headers_mut().insert(ALLOW, HeaderValue::from_static("GET"));
        return response;
    }

    let path = normalize_path(path);
    match path {
        "/" => pages::home(state).await,
        "/blog" => pages::blog_index(state).await,
        "/proveidors" => directory_page(state, query).await,
        "/qui-som" => pages::about(state).await,
        "/fer-se-soci" => pages::membership(),
        "/comunitat" => pages::community(),
        "/robots.txt" => robots(state),
        "/sitemap.xml" => sitemap(state).await,
        "/api/proveidors" => directory_json(state, query).await,
        "/health" | "/healthz" => health_check(state),
        "/status" => status_check(state),
        p => {
            if let Some(slug) = detail_slug(p, BLOG_PREFIX) {
                pages::post(state, &slug).await
            } else if let Some(slug) = detail_slug(p, PROVIDERS_PREFIX) {
                pages::provider(state, &slug).await
            } else {
                pages::not_found()
            }
        }
    }
}

/// Drop a trailing slash, keeping the root as `/`
fn normalize_path(path: &str) -> &str {
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

/// Decoded slug of `{prefix}{slug}`; nested paths and empty slugs don't match
fn detail_slug(path: &str, prefix: &str) -> Option<String> {
    let raw = path.strip_prefix(prefix)?;
    if raw.is_empty() || raw.contains('/') {
        return None;
    }
    urlencoding::decode(raw).ok().map(|slug| slug.into_owned())
}

/// Value of a query parameter, `+` and percent escapes decoded
pub fn query_param(query: Option<&str>, name: &str) -> Option<String> {
    query?
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(key, _)| *key == name)
        .and_then(|(_, value)| {
            let value = value.replace('+', " ");
            urlencoding::decode(&value).ok().map(|v| v.into_owned())
        })
}

/// Build a response with a body and content type
pub fn respond(status: StatusCode, content_type: &'static str, body: impl Into<Bytes>) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(body.into()));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}

/// Serialize a value as a JSON response
pub fn json_response<T: serde::Serialize>(status: StatusCode, value: &T) -> Response<Full<Bytes>> {
    match serde_json::to_vec(value) {
        Ok(body) => respond(status, JSON, body),
        Err(e) => {
            error!(error = %e, "Failed to serialize response");
            respond(
                StatusCode::INTERNAL_SERVER_ERROR,
                JSON,
                r#"{"error":"Internal error"}"#,
            )
        }
    }
}

/// Log a failed content read with its backend details
pub fn log_failure(path: &str, err: &SiteError) {
    match err {
        SiteError::Backend { url, status } => {
            warn!(path = path, backend_url = %url, backend_status = *status, "Backend returned an error")
        }
        SiteError::Unreachable { url, reason } => {
            warn!(path = path, backend_url = %url, reason = %reason, "Backend unreachable")
        }
        other => error!(path = path, error = %other, "Request failed"),
    }
}
