//! Provider directory routes
//!
//! `/proveidors` renders the directory through a [`DirectorySession`]: the
//! provider list is loaded off the render path, the state is snapshotted
//! and the session torn down before rendering. `/api/proveidors` serves the
//! same filtering as JSON.

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use super::{json_response, log_failure, query_param, respond, HTML};
use crate::content::Provider;
use crate::directory::{
    derive_categories, filter_providers, Category, CategoryFilter, DirectorySession,
    DIRECTORY_PAGE_SIZE,
};
use crate::server::AppState;
use crate::site::html;

/// Search query and facet taken from `?q=` and `?categoria=`
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryQuery {
    pub search: String,
    pub category: CategoryFilter,
}

impl DirectoryQuery {
    pub fn parse(query: Option<&str>) -> Self {
        Self {
            search: query_param(query, "q").unwrap_or_default(),
            category: CategoryFilter::from_param(query_param(query, "categoria").as_deref()),
        }
    }
}

#[derive(Debug, Serialize)]
struct DirectoryResponse<'a> {
    categories: Vec<Category>,
    active_category: &'a str,
    query: &'a str,
    total: usize,
    providers: Vec<&'a Provider>,
}

#[derive(Debug, Serialize)]
struct DirectoryError {
    error: String,
}

/// Handle GET /proveidors
pub async fn directory_page(state: &AppState, query: Option<&str>) -> Response<Full<Bytes>> {
    let params = DirectoryQuery::parse(query);
    let session = DirectorySession::new();

    let client = Arc::clone(&state.client);
    let load = session.load(async move { client.providers(DIRECTORY_PAGE_SIZE).await });
    if let Err(e) = load.await {
        warn!(error = %e, "Directory load task failed");
    }

    let snapshot = session.snapshot().await;
    session.teardown().await;

    debug!(
        search = %params.search,
        category = params.category.id(),
        "Rendering directory"
    );
    respond(
        StatusCode::OK,
        HTML,
        html::directory(&snapshot, &params.search, &params.category),
    )
}

/// Handle GET /api/proveidors
pub async fn directory_json(state: &AppState, query: Option<&str>) -> Response<Full<Bytes>> {
    let params = DirectoryQuery::parse(query);

    let providers = match state.client.providers(DIRECTORY_PAGE_SIZE).await {
        Ok(providers) => providers,
        Err(e) => {
            log_failure("/api/proveidors", &e);
            return json_response(
                e.status_code(),
                &DirectoryError {
                    error: e.public_message(),
                },
            );
        }
    };

    let matches = filter_providers(&providers, &params.search, &params.category);
    json_response(
        StatusCode::OK,
        &DirectoryResponse {
            categories: derive_categories(&providers),
            active_category: params.category.id(),
            query: &params.search,
            total: matches.len(),
            providers: matches,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_directory_query() {
        let params = DirectoryQuery::parse(Some("q=Formatge&categoria=lactis"));
        assert_eq!(params.search, "Formatge");
        assert_eq!(params.category, CategoryFilter::Tipus("lactis".to_string()));

        let params = DirectoryQuery::parse(Some("categoria=all"));
        assert_eq!(params.search, "");
        assert_eq!(params.category, CategoryFilter::All);

        assert_eq!(DirectoryQuery::parse(None).category, CategoryFilter::All);
    }
}
