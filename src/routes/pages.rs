//! HTML page handlers
//!
//! Missing records render the not-found page with 404. Any other content
//! error renders the failure page with the error's status and is logged.

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use tracing::{debug, warn};

use super::{log_failure, respond, HTML};
use crate::server::AppState;
use crate::site::{html, ABOUT_PAGE_SLUG, BLOG_PREFIX, HOME_PAGE_SLUG, PROVIDERS_PREFIX};
use crate::types::SiteError;

/// Latest posts shown on the home page
pub const HOME_POSTS: u32 = 3;
/// Posts listed on the blog index
pub const BLOG_PAGE_SIZE: u32 = 100;

fn ok(body: String) -> Response<Full<Bytes>> {
    respond(StatusCode::OK, HTML, body)
}

fn failure(path: &str, err: &SiteError) -> Response<Full<Bytes>> {
    log_failure(path, err);
    respond(err.status_code(), HTML, html::error_page(err))
}

pub async fn home(state: &AppState) -> Response<Full<Bytes>> {
    let result = tokio::try_join!(
        state.client.page_by_slug(HOME_PAGE_SLUG),
        state.client.latest_posts(HOME_POSTS)
    );

    match result {
        Ok((hero, posts)) => ok(html::home(&hero, &posts)),
        Err(e) if e.is_not_found() => {
            warn!(slug = HOME_PAGE_SLUG, "Home page missing in the CMS");
            not_found()
        }
        Err(e) => failure("/", &e),
    }
}

pub async fn blog_index(state: &AppState) -> Response<Full<Bytes>> {
    match state.client.latest_posts(BLOG_PAGE_SIZE).await {
        Ok(posts) => ok(html::blog_index(&posts)),
        Err(e) => failure("/blog", &e),
    }
}

pub async fn post(state: &AppState, slug: &str) -> Response<Full<Bytes>> {
    match state.client.post_by_slug(slug).await {
        Ok(Some(post)) => ok(html::post_detail(&post)),
        Ok(None) => {
            debug!(slug = slug, "Post not found");
            respond(StatusCode::NOT_FOUND, HTML, html::post_not_found())
        }
        Err(e) => failure(&format!("{}{}", BLOG_PREFIX, slug), &e),
    }
}

pub async fn provider(state: &AppState, slug: &str) -> Response<Full<Bytes>> {
    match state.client.provider_by_slug(slug).await {
        Ok(Some(provider)) => ok(html::provider_detail(&provider)),
        Ok(None) => {
            debug!(slug = slug, "Provider not found");
            respond(StatusCode::NOT_FOUND, HTML, html::provider_not_found())
        }
        Err(e) => failure(&format!("{}{}", PROVIDERS_PREFIX, slug), &e),
    }
}

pub async fn about(state: &AppState) -> Response<Full<Bytes>> {
    match state.client.page_by_slug(ABOUT_PAGE_SLUG).await {
        Ok(page) => ok(html::cms_page(&page)),
        Err(e) if e.is_not_found() => not_found(),
        Err(e) => failure("/qui-som", &e),
    }
}

pub fn membership() -> Response<Full<Bytes>> {
    ok(html::membership())
}

pub fn community() -> Response<Full<Bytes>> {
    ok(html::community())
}

pub fn not_found() -> Response<Full<Bytes>> {
    respond(StatusCode::NOT_FOUND, HTML, html::not_found())
}
