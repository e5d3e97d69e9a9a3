//! TTL Store Module
//!
//! Bounded key/value map with per-entry expiry. Reads check expiry lazily and
//! never mutate the map; sweeps and capacity eviction reclaim entries.
//! Callers share it through [`TtlCache`](crate::cache::TtlCache), which puts
//! it behind a reader/writer lock.

use std::collections::HashMap;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::cache::entry::current_timestamp_ms;
use crate::cache::stats::StatsRecorder;
use crate::cache::{CacheEntry, CacheStats};
use crate::error::Result;

// == TTL Store ==
/// Key/value storage with a fixed TTL and earliest-expiry eviction.
#[derive(Debug)]
pub struct TtlStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Performance statistics
    stats: StatsRecorder,
    /// Maximum number of entries allowed
    max_size: usize,
    /// Lifetime given to every entry on insertion
    ttl: Duration,
}

impl<V: Clone> TtlStore<V> {
    // == Constructor ==
    /// Creates a new store. A `max_size` of zero is treated as one.
    pub fn new(ttl: Duration, max_size: usize) -> Self {
        Self {
            entries: HashMap::new(),
            stats: StatsRecorder::default(),
            max_size: max_size.max(1),
            ttl,
        }
    }

    // == Get ==
    /// Returns a copy of the value if present and not expired.
    ///
    /// Expired entries stay in the map until the next sweep or eviction.
    pub fn get(&self, key: &str) -> Option<V> {
        self.get_at(key, current_timestamp_ms())
    }

    pub(crate) fn get_at(&self, key: &str, now_ms: u64) -> Option<V> {
        match self.entries.get(key) {
            Some(entry) if !entry.is_expired_at(now_ms) => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            _ => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Contains ==
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    // == Set ==
    /// Stores a value, resetting its expiry to `now + ttl`.
    ///
    /// Inserting a new key into a full store first evicts the entry with the
    /// earliest expiry. Overwrites never evict.
    pub fn set(&mut self, key: impl Into<String>, value: V) {
        self.set_at(key.into(), value, current_timestamp_ms());
    }

    pub(crate) fn set_at(&mut self, key: String, value: V, now_ms: u64) {
        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_size {
            self.evict_earliest();
        }

        self.entries
            .insert(key, CacheEntry::new(value, self.ttl, now_ms));
    }

    // == Evict ==
    /// Removes the entry with the smallest `expires_at`.
    ///
    /// Ties go to the lexicographically smallest key so the choice does not
    /// depend on hash iteration order.
    fn evict_earliest(&mut self) -> Option<String> {
        let victim = self
            .entries
            .iter()
            .min_by(|(ka, a), (kb, b)| a.expires_at.cmp(&b.expires_at).then_with(|| ka.cmp(kb)))
            .map(|(key, _)| key.clone())?;

        self.entries.remove(&victim);
        self.stats.record_eviction();
        debug!(key = %victim, "cache evicted");
        Some(victim)
    }

    // == Remove ==
    /// Removes an entry, returning whether it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // == Sweep ==
    /// Removes every entry with `expires_at <= now` and returns the count.
    pub fn sweep_expired(&mut self) -> usize {
        self.sweep_expired_at(current_timestamp_ms())
    }

    pub(crate) fn sweep_expired_at(&mut self, now_ms: u64) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now_ms));

        let removed = before - self.entries.len();
        self.stats.record_expired(removed);
        removed
    }

    // == Length ==
    /// Number of entries held, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.entries.len())
    }

    /// Expiry timestamp of a raw entry, expired or not.
    #[cfg(test)]
    pub(crate) fn expires_at(&self, key: &str) -> Option<u64> {
        self.entries.get(key).map(|e| e.expires_at)
    }
}

// == JSON Helpers ==
impl TtlStore<Value> {
    /// Serializes `value` and stores the encoded text.
    pub fn set_json<T: Serialize + ?Sized>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> Result<()> {
        let encoded = serde_json::to_string(value)?;
        self.set(key, Value::String(encoded));
        Ok(())
    }

    /// Decodes a stored value into `T`.
    ///
    /// A stored string is parsed as JSON text; any other value is converted
    /// structurally. Decode failures read as a miss.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        decode_json(self.get(key)?)
    }
}

pub(crate) fn decode_json<T: DeserializeOwned>(value: Value) -> Option<T> {
    match value {
        Value::String(text) => serde_json::from_str(&text).ok(),
        other => serde_json::from_value(other).ok(),
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use std::thread::sleep;

    const TTL: Duration = Duration::from_secs(300);

    #[test]
    fn test_store_new() {
        let store: TtlStore<String> = TtlStore::new(TTL, 100);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = TtlStore::new(TTL, 100);

        store.set("key1", "value1".to_string());

        assert_eq!(store.get("key1").as_deref(), Some("value1"));
        assert!(store.contains("key1"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let store: TtlStore<String> = TtlStore::new(TTL, 100);
        assert!(store.get("nonexistent").is_none());
        assert!(!store.contains("nonexistent"));
    }

    #[test]
    fn test_store_remove_and_clear() {
        let mut store = TtlStore::new(TTL, 100);
        store.set("key1", 1);
        store.set("key2", 2);

        assert!(store.remove("key1"));
        assert!(!store.remove("key1"));
        assert!(store.get("key1").is_none());

        store.clear();
        assert!(store.is_empty());
        assert!(store.get("key2").is_none());
    }

    #[test]
    fn test_store_overwrite_refreshes_expiry() {
        let mut store = TtlStore::new(Duration::from_millis(1_000), 100);

        store.set_at("key1".into(), "value1", 10_000);
        store.set_at("key1".into(), "value2", 10_400);

        assert_eq!(store.len(), 1);
        assert_eq!(store.expires_at("key1"), Some(11_400));
        assert_eq!(store.get_at("key1", 11_200), Some("value2"));
    }

    #[test]
    fn test_lazy_expiry_without_sweep() {
        let mut store = TtlStore::new(Duration::from_millis(1_000), 100);
        store.set_at("key1".into(), "v", 5_000);

        assert_eq!(store.get_at("key1", 5_999), Some("v"));
        assert_eq!(store.get_at("key1", 6_000), None);
        // Still physically present until swept.
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_ttl_expiration_wall_clock() {
        let mut store = TtlStore::new(Duration::from_millis(50), 100);
        store.set("key1", "value1");
        assert!(store.get("key1").is_some());

        sleep(Duration::from_millis(80));

        assert!(store.get("key1").is_none());
    }

    #[test]
    fn test_eviction_picks_earliest_expiry() {
        let mut store = TtlStore::new(TTL, 3);
        store.set_at("b".into(), 1, 2_000);
        store.set_at("a".into(), 2, 1_000);
        store.set_at("c".into(), 3, 3_000);

        store.set_at("d".into(), 4, 4_000);

        assert_eq!(store.len(), 3);
        assert_eq!(store.expires_at("a"), None);
        assert!(store.expires_at("b").is_some());
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_eviction_tie_breaks_on_smallest_key() {
        let mut store = TtlStore::new(TTL, 3);
        store.set_at("zeta".into(), 1, 1_000);
        store.set_at("alpha".into(), 2, 1_000);
        store.set_at("mid".into(), 3, 1_000);

        store.set_at("new".into(), 4, 1_000);

        assert_eq!(store.expires_at("alpha"), None);
        assert!(store.expires_at("zeta").is_some());
        assert!(store.expires_at("mid").is_some());
    }

    #[test]
    fn test_overwrite_at_capacity_does_not_evict() {
        let mut store = TtlStore::new(TTL, 2);
        store.set("key1", 1);
        store.set("key2", 2);

        store.set("key1", 10);

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("key2"), Some(2));
        assert_eq!(store.stats().evictions, 0);
    }

    #[test]
    fn test_zero_capacity_holds_one() {
        let mut store = TtlStore::new(TTL, 0);
        store.set("a", 1);
        store.set("b", 2);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("b"), Some(2));
    }

    #[test]
    fn test_store_sweep_expired() {
        let mut store = TtlStore::new(Duration::from_millis(1_000), 100);
        store.set_at("old".into(), 1, 1_000);
        store.set_at("new".into(), 2, 5_000);

        let removed = store.sweep_expired_at(2_000);

        assert_eq!(removed, 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get_at("new", 2_000), Some(2));
        assert_eq!(store.stats().expired_removed, 1);
    }

    #[test]
    fn test_store_stats() {
        let mut store = TtlStore::new(TTL, 100);

        store.set("key1", "value1");
        store.get("key1");
        store.get("nonexistent");

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct User {
        id: u32,
        name: String,
    }

    #[test]
    fn test_set_json_round_trip() {
        let mut store = TtlStore::new(TTL, 100);
        let user = User { id: 7, name: "ada".into() };

        store.set_json("user:7", &user).unwrap();

        assert!(matches!(store.get("user:7"), Some(Value::String(_))));
        assert_eq!(store.get_json::<User>("user:7"), Some(user));
    }

    #[test]
    fn test_get_json_from_structured_value() {
        let mut store = TtlStore::new(TTL, 100);
        store.set("user:8", json!({"id": 8, "name": "grace"}));

        let user: Option<User> = store.get_json("user:8");
        assert_eq!(user, Some(User { id: 8, name: "grace".into() }));
    }

    #[test]
    fn test_get_json_decode_failure_is_miss() {
        let mut store = TtlStore::new(TTL, 100);
        store.set("plain", Value::String("list all users".into()));
        store.set("number", json!(42));

        assert_eq!(store.get_json::<User>("plain"), None);
        assert_eq!(store.get_json::<User>("number"), None);
        assert_eq!(store.get_json::<User>("absent"), None);
    }
}
