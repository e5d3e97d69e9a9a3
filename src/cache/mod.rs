//! Cache Module
//!
//! Provides in-memory key/value caching with TTL expiration and
//! earliest-expiry eviction.

mod entry;
mod shared;
mod stats;
pub(crate) mod store;


// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use shared::TtlCache;
pub use stats::CacheStats;
pub use store::TtlStore;
