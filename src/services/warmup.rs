//! Cache warm-up
//!
//! Enumerates every post and provider slug and fetches each detail once so
//! the first visitors are served from the cache.

use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::content::ContentClient;
use crate::types::Result;

/// Detail fetches in flight at once
pub const WARMUP_CONCURRENCY: usize = 4;

/// Outcome of one warm-up pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WarmupReport {
    /// Post details now cached
    pub posts: usize,
    /// Provider details now cached
    pub providers: usize,
    /// Detail fetches that failed
    pub failures: usize,
}

#[derive(Debug, Clone, Copy)]
enum Detail {
    Post,
    Provider,
}

/// Fetch every known post and provider detail through the client's cache
pub async fn warm_cache(client: Arc<ContentClient>) -> Result<WarmupReport> {
    let (post_slugs, provider_slugs) =
        tokio::try_join!(client.all_post_slugs(), client.all_provider_slugs())?;

    let permits = Arc::new(Semaphore::new(WARMUP_CONCURRENCY));
    let slugs = post_slugs
        .into_iter()
        .map(|slug| (Detail::Post, slug))
        .chain(provider_slugs.into_iter().map(|slug| (Detail::Provider, slug)));

    let mut tasks: Vec<(Detail, String, JoinHandle<Result<bool>>)> = Vec::new();
    for (kind, slug) in slugs {
        let client = Arc::clone(&client);
        let permits = Arc::clone(&permits);
        let task_slug = slug.clone();

        let handle = tokio::spawn(async move {
            let _permit = permits.acquire_owned().await;
            match kind {
                Detail::Post => client.post_by_slug(&task_slug).await.map(|p| p.is_some()),
                Detail::Provider => client.provider_by_slug(&task_slug).await.map(|p| p.is_some()),
            }
        });
        tasks.push((kind, slug, handle));
    }

    let mut report = WarmupReport::default();
    for (kind, slug, handle) in tasks {
        match handle.await {
            Ok(Ok(true)) => match kind {
                Detail::Post => report.posts += 1,
                Detail::Provider => report.providers += 1,
            },
            Ok(Ok(false)) => debug!(kind = ?kind, slug = %slug, "Listed slug has no detail record"),
            Ok(Err(e)) => {
                warn!(kind = ?kind, slug = %slug, error = %e, "Warm-up fetch failed");
                report.failures += 1;
            }
            Err(e) => {
                warn!(kind = ?kind, slug = %slug, error = %e, "Warm-up task panicked");
                report.failures += 1;
            }
        }
    }

    Ok(report)
}

/// Run one warm-up pass in the background
pub fn spawn_warmup_task(client: Arc<ContentClient>) -> JoinHandle<()> {
    let handle = tokio::spawn(async move {
        match warm_cache(client).await {
            Ok(report) => info!(
                posts = report.posts,
                providers = report.providers,
                failures = report.failures,
                "Cache warm-up finished"
            ),
            Err(e) => warn!(error = %e, "Cache warm-up could not enumerate slugs"),
        }
    });

    info!("Cache warm-up task started");
    handle
}
