//! Shared TTL Cache
//!
//! Cloneable handle over a [`TtlStore`] guarded by a single reader/writer
//! lock. Lookups take the shared lock; every mutation takes it exclusively.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;

use crate::cache::{CacheStats, TtlStore};
use crate::error::{ApiError, Result};
use crate::tasks::{spawn_sweeper, Sweeper};

// == TTL Cache ==
pub struct TtlCache<V> {
    store: Arc<RwLock<TtlStore<V>>>,
    sweeper_claimed: Arc<AtomicBool>,
}

impl<V> Clone for TtlCache<V> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            sweeper_claimed: Arc::clone(&self.sweeper_claimed),
        }
    }
}

impl<V: Clone + Send + Sync + 'static> TtlCache<V> {
    /// Creates a cache without a background sweeper.
    pub fn new(ttl: Duration, max_size: usize) -> Self {
        Self {
            store: Arc::new(RwLock::new(TtlStore::new(ttl, max_size))),
            sweeper_claimed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Creates a cache together with its sweeper.
    ///
    /// Must be called from within a tokio runtime.
    pub fn with_sweeper(
        ttl: Duration,
        max_size: usize,
        interval: Duration,
        label: &'static str,
    ) -> Result<(Self, Sweeper)> {
        let cache = Self::new(ttl, max_size);
        let sweeper = spawn_sweeper(cache.clone(), interval, label)?;
        Ok((cache, sweeper))
    }

    /// Marks the sweeper slot as taken; fails if a sweeper already exists.
    pub(crate) fn claim_sweeper(&self, label: &'static str) -> Result<()> {
        self.sweeper_claimed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| ())
            .map_err(|_| ApiError::SweeperRunning(label))
    }

    pub async fn get(&self, key: &str) -> Option<V> {
        self.store.read().await.get(key)
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.store.read().await.contains(key)
    }

    pub async fn set(&self, key: impl Into<String>, value: V) {
        self.store.write().await.set(key, value);
    }

    pub async fn remove(&self, key: &str) -> bool {
        self.store.write().await.remove(key)
    }

    pub async fn clear(&self) {
        self.store.write().await.clear();
    }

    pub async fn sweep_expired(&self) -> usize {
        self.store.write().await.sweep_expired()
    }

    /// Entry count, including expired entries not yet swept.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }
}

impl TtlCache<Value> {
    pub async fn set_json<T: Serialize + ?Sized>(
        &self,
        key: impl Into<String>,
        value: &T,
    ) -> Result<()> {
        // Encode before locking so serialization never runs under the write lock.
        let encoded = serde_json::to_string(value)?;
        self.set(key, Value::String(encoded)).await;
        Ok(())
    }

    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.get(key).await?;
        crate::cache::store::decode_json(value)
    }
}
