//! Response Cache Service
//!
//! An HTTP service with two in-process cache layers: a generic TTL key/value
//! store used by handlers, and a response cache that replays whole responses
//! keyed by method and path. Both are bounded, expire entries lazily on read,
//! and reclaim them with a background sweeper.

pub mod admission;
pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod response_cache;
pub mod tasks;

pub use api::{create_router, AppState};
pub use config::Config;
pub use tasks::{spawn_sweeper, Sweeper};
