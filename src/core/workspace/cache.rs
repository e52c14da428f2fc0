//! TTL cache for the workspace reference configuration

use super::error::ApiError;
use super::remote::TaskRemote;
use crate::core::models::ReferenceConfig;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Default freshness window for the cached reference configuration
pub const REFERENCE_CACHE_TTL: Duration = Duration::from_secs(300);

struct CacheEntry {
    config: Arc<ReferenceConfig>,
    fetched_at: Instant,
}

/// Caches the reference configuration in front of [`TaskRemote`].
///
/// A snapshot fetched at the start of a batch is used for the whole batch;
/// references created remotely mid-run become visible on the next refresh
/// or with `cache_bust`. Concurrent refreshes may fetch twice; last write
/// wins and both callers get a valid snapshot.
pub struct ReferenceCache {
    remote: Arc<dyn TaskRemote>,
    entry: RwLock<Option<CacheEntry>>,
    ttl: Duration,
}

impl ReferenceCache {
    /// Create a cache with the default TTL
    pub fn new(remote: Arc<dyn TaskRemote>) -> Self {
        Self::with_ttl(remote, REFERENCE_CACHE_TTL)
    }

    /// Create a cache with a custom TTL
    pub fn with_ttl(remote: Arc<dyn TaskRemote>, ttl: Duration) -> Self {
        Self {
            remote,
            entry: RwLock::new(None),
            ttl,
        }
    }

    /// Return the cached configuration, refreshing when stale or when
    /// `cache_bust` is set.
    pub async fn fetch(
        &self,
        cache_bust: bool,
    ) -> std::result::Result<Arc<ReferenceConfig>, ApiError> {
        if !cache_bust {
            if let Some(entry) = self.entry.read().as_ref() {
                if entry.fetched_at.elapsed() < self.ttl {
                    return Ok(Arc::clone(&entry.config));
                }
            }
        }

        debug!(cache_bust, "refreshing reference configuration");
        let config = Arc::new(self.remote.fetch_reference_config().await?);

        *self.entry.write() = Some(CacheEntry {
            config: Arc::clone(&config),
            fetched_at: Instant::now(),
        });

        Ok(config)
    }

    /// Drop the cached snapshot
    pub fn invalidate(&self) {
        *self.entry.write() = None;
    }
}
