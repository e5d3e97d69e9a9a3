//! Response cache key derivation.

use axum::http::{Method, Uri};
use sha2::{Digest, Sha256};

/// Derives the cache key for a request: hex SHA-256 of `METHOD:path`.
///
/// The query string and all headers are left out, so requests differing only
/// in those share one entry.
pub fn cache_key(method: &Method, uri: &Uri) -> String {
    let mut hasher = Sha256::new();
    hasher.update(method.as_str().as_bytes());
    hasher.update(b":");
    hasher.update(uri.path().as_bytes());
    hex::encode(hasher.finalize())
}
