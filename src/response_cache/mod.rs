//! Response Cache Module
//!
//! Memoizes whole HTTP responses (status, headers, body) keyed by method and
//! path, on top of the same TTL store the handlers use.

mod cache;
mod capture;
mod key;
mod snapshot;

pub use cache::ResponseCache;
pub use capture::{inject_cache_flag, RecordedBody};
pub use key::cache_key;
pub use snapshot::ResponseSnapshot;

/// Header added to responses replayed from the cache
pub const CACHE_STATUS_HEADER: &str = "x-cache";
