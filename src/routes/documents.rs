//! Crawler documents: `/robots.txt` and `/sitemap.xml`.

use bytes::Bytes;
use chrono::Utc;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use tracing::debug;

use super::{log_failure, respond, TEXT, XML};
use crate::server::AppState;
use crate::site::sitemap::SITEMAP_POSTS;
use crate::site::{render_robots, render_sitemap, site_index};
use crate::types::Result;

pub fn robots(state: &AppState) -> Response<Full<Bytes>> {
    respond(StatusCode::OK, TEXT, render_robots(&state.config))
}

pub async fn sitemap(state: &AppState) -> Response<Full<Bytes>> {
    match build_sitemap(state).await {
        Ok(xml) => respond(StatusCode::OK, XML, xml),
        Err(e) => {
            log_failure("/sitemap.xml", &e);
            respond(e.status_code(), TEXT, "Sitemap unavailable")
        }
    }
}

async fn build_sitemap(state: &AppState) -> Result<String> {
    let (posts, provider_slugs) = tokio::try_join!(
        state.client.latest_posts(SITEMAP_POSTS),
        state.client.all_provider_slugs()
    )?;
    let entries = site_index(&state.config, &posts, &provider_slugs, Utc::now())?;
    debug!(entries = entries.len(), "Sitemap built");
    Ok(render_sitemap(&entries))
}
