//! HTTP Middleware
//!
//! Admission gate and response caching, applied with
//! `axum::middleware::from_fn_with_state`.

mod rate_limit;
mod response_cache;

pub use rate_limit::rate_limit_middleware;
pub use response_cache::response_cache_middleware;
