//! Cached, normalizing client over a [`ContentBackend`].

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

use super::backend::{ContentBackend, HttpBackend};
use super::normalize;
use super::records::{Page, PostDetail, PostSummary, Provider};
use crate::cache::{ContentCache, QueryKey};
use crate::config::SiteConfig;
use crate::types::{Result, SiteError};

/// Collection of singleton CMS pages
pub const PAGES: &str = "pages";
/// Collection of blog posts
pub const POSTS: &str = "posts";
/// Custom post type holding the provider directory
pub const PROVIDERS: &str = "proveedores";

/// Page size used when enumerating slugs. The backend caps `per_page` at
/// 100, so sites with more records are under-enumerated.
pub const SLUG_PAGE_SIZE: u32 = 100;

/// Default page size for latest posts
pub const DEFAULT_POSTS_PER_PAGE: u32 = 10;

/// Default page size for the provider list
pub const DEFAULT_PROVIDERS_PER_PAGE: u32 = 100;

/// Read-only client for posts, pages and providers
pub struct ContentClient {
    backend: Arc<dyn ContentBackend>,
    cache: Arc<ContentCache>,
    api_url: String,
}

impl ContentClient {
    /// Create a client over an arbitrary backend
    pub fn new(config: &SiteConfig, backend: Arc<dyn ContentBackend>, cache: Arc<ContentCache>) -> Self {
        Self {
            backend,
            cache,
            api_url: config.api_url.clone(),
        }
    }

    /// Create a client talking HTTP to the configured origin
    pub fn from_config(config: &SiteConfig, cache: Arc<ContentCache>) -> Result<Self> {
        let backend = HttpBackend::new(config.backend_origin.clone(), config.request_timeout)?;
        info!(
            backend = %config.backend_origin,
            revalidate_secs = cache.config().revalidate.as_secs(),
            "Content client ready"
        );
        Ok(Self::new(config, Arc::new(backend), cache))
    }

    /// Shared response cache
    pub fn cache(&self) -> &Arc<ContentCache> {
        &self.cache
    }

    /// Fetch a singleton page by slug.
    ///
    /// Zero matches is [`SiteError::NotFound`]; when several records share
    /// the slug the first one wins.
    pub async fn page_by_slug(&self, slug: &str) -> Result<Page> {
        let body = self.fetch(&QueryKey::new(PAGES).slug(slug).embed()).await?;
        match normalize::first_record(&body)? {
            Some(raw) => normalize::page(raw),
            None => Err(SiteError::NotFound(format!("Page {} not found", slug))),
        }
    }

    /// Latest posts in backend order (newest first), at most `per_page`
    pub async fn latest_posts(&self, per_page: u32) -> Result<Vec<PostSummary>> {
        let body = self.fetch(&QueryKey::new(POSTS).per_page(per_page).embed()).await?;
        normalize::records(&body)?
            .iter()
            .take(per_page as usize)
            .map(normalize::post_summary)
            .collect()
    }

    /// Fetch one post; `None` when no post has this slug
    pub async fn post_by_slug(&self, slug: &str) -> Result<Option<PostDetail>> {
        let body = self.fetch(&QueryKey::new(POSTS).slug(slug).embed()).await?;
        normalize::first_record(&body)?
            .map(normalize::post_detail)
            .transpose()
    }

    /// Slugs of every post the backend returns in one page
    pub async fn all_post_slugs(&self) -> Result<Vec<String>> {
        self.all_slugs(POSTS).await
    }

    /// Providers in backend order, at most `per_page`
    pub async fn providers(&self, per_page: u32) -> Result<Vec<Provider>> {
        let body = self
            .fetch(&QueryKey::new(PROVIDERS).per_page(per_page).embed())
            .await?;
        normalize::records(&body)?
            .iter()
            .take(per_page as usize)
            .map(normalize::provider)
            .collect()
    }

    /// Fetch one provider; `None` when no provider has this slug
    pub async fn provider_by_slug(&self, slug: &str) -> Result<Option<Provider>> {
        let body = self.fetch(&QueryKey::new(PROVIDERS).slug(slug).embed()).await?;
        normalize::first_record(&body)?
            .map(normalize::provider)
            .transpose()
    }

    /// Slugs of every provider the backend returns in one page
    pub async fn all_provider_slugs(&self) -> Result<Vec<String>> {
        self.all_slugs(PROVIDERS).await
    }

    async fn all_slugs(&self, collection: &str) -> Result<Vec<String>> {
        let body = self
            .fetch(&QueryKey::new(collection).per_page(SLUG_PAGE_SIZE).slugs_only())
            .await?;
        let slugs = normalize::slugs(&body)?;
        if slugs.len() >= SLUG_PAGE_SIZE as usize {
            debug!(
                collection = collection,
                count = slugs.len(),
                "Slug enumeration hit the backend page size, later records are not listed"
            );
        }
        Ok(slugs)
    }

    /// Serve a read from the cache or the backend. Failures are not cached.
    async fn fetch(&self, key: &QueryKey) -> Result<Arc<Value>> {
        let storage_key = key.to_storage_key();
        if let Some(entry) = self.cache.get(&storage_key) {
            return Ok(entry.data);
        }

        let url = key.to_url(&self.api_url);
        debug!(backend = self.backend.id(), key = %key, "Fetching from backend");
        let body = self.backend.get_json(&url).await?;
        self.cache.set(&storage_key, body.clone());
        Ok(Arc::new(body))
    }
}
