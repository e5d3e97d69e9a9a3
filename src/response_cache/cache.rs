//! Response cache over the shared TTL store.

use std::time::Duration;

use axum::http::{Method, Uri};
use tracing::debug;

use crate::cache::{CacheStats, TtlCache};
use crate::error::Result;
use crate::response_cache::{cache_key, ResponseSnapshot};
use crate::tasks::Sweeper;

/// Stores whole response snapshots keyed by method and path.
///
/// Policy-agnostic: whatever is handed to [`store`](Self::store) is kept.
/// Deciding which responses qualify is the middleware's job.
#[derive(Clone)]
pub struct ResponseCache {
    entries: TtlCache<ResponseSnapshot>,
}

impl ResponseCache {
    pub fn new(ttl: Duration, max_size: usize) -> Self {
        Self {
            entries: TtlCache::new(ttl, max_size),
        }
    }

    /// Creates the cache and starts its sweeper.
    pub fn with_sweeper(
        ttl: Duration,
        max_size: usize,
        interval: Duration,
    ) -> Result<(Self, Sweeper)> {
        let (entries, sweeper) = TtlCache::with_sweeper(ttl, max_size, interval, "responses")?;
        Ok((Self { entries }, sweeper))
    }

    pub async fn lookup(&self, method: &Method, uri: &Uri) -> Option<ResponseSnapshot> {
        let key = cache_key(method, uri);
        let hit = self.entries.get(&key).await;
        if hit.is_some() {
            debug!(key = %key, path = uri.path(), "cache hit");
        }
        hit
    }

    pub async fn store(&self, method: &Method, uri: &Uri, snapshot: ResponseSnapshot) {
        let key = cache_key(method, uri);
        debug!(key = %key, path = uri.path(), "cache set");
        self.entries.set(key, snapshot).await;
    }

    pub async fn len(&self) -> usize {
        self.entries.len().await
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.is_empty().await
    }

    pub async fn clear(&self) {
        self.entries.clear().await;
    }

    pub async fn stats(&self) -> CacheStats {
        self.entries.stats().await
    }
}
