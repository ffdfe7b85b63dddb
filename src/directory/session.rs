//! Directory session state.
//!
//! The provider list is fetched once, off the render path. Until it arrives
//! the session is `Loading`; afterwards it is `Ready` or `Errored`. A fetch
//! that completes after `teardown()` is dropped instead of applied.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::filter::{derive_categories, filter_providers, Category, CategoryFilter};
use crate::content::Provider;
use crate::types::Result;

/// Exclusive states of a directory session
#[derive(Debug, Clone, PartialEq)]
pub enum DirectoryState {
    Loading,
    Ready(Vec<Provider>),
    /// The provider list could not be loaded; carries a visitor-facing message
    Errored(String),
}

/// What the listing area shows for a given query and category
#[derive(Debug, PartialEq)]
pub enum Listing<'a> {
    Loading,
    Errored(&'a str),
    /// Providers loaded but none matches
    NoResults,
    Results(Vec<&'a Provider>),
}

impl DirectoryState {
    /// Facets for the current state; only "all" until providers are loaded
    pub fn categories(&self) -> Vec<Category> {
        match self {
            Self::Ready(providers) => derive_categories(providers),
            _ => derive_categories(&[]),
        }
    }

    pub fn listing(&self, query: &str, category: &CategoryFilter) -> Listing<'_> {
        match self {
            Self::Loading => Listing::Loading,
            Self::Errored(message) => Listing::Errored(message),
            Self::Ready(providers) => {
                let matches = filter_providers(providers, query, category);
                if matches.is_empty() {
                    Listing::NoResults
                } else {
                    Listing::Results(matches)
                }
            }
        }
    }
}

/// One directory view's provider list and lifecycle
#[derive(Clone)]
pub struct DirectorySession {
    state: Arc<RwLock<DirectoryState>>,
    torn_down: Arc<AtomicBool>,
}

impl DirectorySession {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(DirectoryState::Loading)),
            torn_down: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Start loading providers in the background.
    ///
    /// The returned handle resolves to `true` when the result was applied
    /// and `false` when the session had been torn down first.
    pub fn load<F>(&self, fetch: F) -> JoinHandle<bool>
    where
        F: Future<Output = Result<Vec<Provider>>> + Send + 'static,
    {
        let state = Arc::clone(&self.state);
        let torn_down = Arc::clone(&self.torn_down);

        tokio::spawn(async move {
            let result = fetch.await;

            let mut guard = state.write().await;
            if torn_down.load(Ordering::SeqCst) {
                debug!("Directory session torn down, discarding provider list");
                return false;
            }

            *guard = match result {
                Ok(providers) => {
                    debug!(count = providers.len(), "Directory providers loaded");
                    DirectoryState::Ready(providers)
                }
                Err(e) => {
                    warn!(error = %e, "Directory providers failed to load");
                    DirectoryState::Errored(e.public_message())
                }
            };
            true
        })
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> DirectoryState {
        self.state.read().await.clone()
    }

    /// Stop accepting results from in-flight loads
    pub async fn teardown(&self) {
        let _guard = self.state.write().await;
        self.torn_down.store(true, Ordering::SeqCst);
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down.load(Ordering::SeqCst)
    }
}

impl Default for DirectorySession {
    fn default() -> Self {
        Self::new()
    }
}
