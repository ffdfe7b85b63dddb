//! Response cache for content backend reads
//!
//! Every backend read may be served from memory for a fixed revalidation
//! window instead of a fresh network call. Staleness inside the window is
//! accepted; nothing is revalidated early.
//!
//! Entries are keyed by [`QueryKey`], which is the canonical request URL.

pub mod keys;
pub mod store;

pub use keys::QueryKey;
pub use store::{spawn_cleanup_task, CacheEntry, CacheStats, ContentCache};

use std::time::Duration;

/// Default revalidation window for backend reads
pub const DEFAULT_REVALIDATE_SECS: u64 = 60;

/// Cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries in the cache
    pub max_entries: usize,
    /// How long a backend response may be served without re-querying
    pub revalidate: Duration,
    /// Cleanup interval
    pub cleanup_interval: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 1_000,
            revalidate: Duration::from_secs(DEFAULT_REVALIDATE_SECS),
            cleanup_interval: Duration::from_secs(60),
        }
    }
}

impl CacheConfig {
    /// Create config from environment or defaults
    pub fn from_env() -> Self {
        let max_entries = std::env::var("CACHE_MAX_ENTRIES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(1_000);

        let revalidate_secs = std::env::var("CACHE_REVALIDATE_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_REVALIDATE_SECS);

        Self {
            max_entries,
            revalidate: Duration::from_secs(revalidate_secs),
            cleanup_interval: Duration::from_secs(60),
        }
    }

    /// Config that never serves from memory
    pub fn disabled() -> Self {
        Self {
            revalidate: Duration::ZERO,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.max_entries, 1_000);
        assert_eq!(config.revalidate, Duration::from_secs(60));
    }

    #[test]
    fn test_disabled_config() {
        assert_eq!(CacheConfig::disabled().revalidate, Duration::ZERO);
    }
}
