//! Shared application state.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::info;

use crate::admission::TokenBucket;
use crate::cache::TtlCache;
use crate::config::Config;
use crate::error::Result;
use crate::response_cache::ResponseCache;
use crate::tasks::Sweeper;

/// Application state shared across all handlers.
///
/// Each component is optional; a disabled layer is simply absent.
#[derive(Clone, Default)]
pub struct AppState {
    /// Generic TTL store consulted by handlers
    pub store: Option<TtlCache<Value>>,
    /// Whole-response cache used by the caching middleware
    pub responses: Option<ResponseCache>,
    /// Admission gate
    pub limiter: Option<Arc<TokenBucket>>,
    /// Upper bound on producing a response; `None` waits indefinitely
    pub request_timeout: Option<Duration>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(mut self, store: TtlCache<Value>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_responses(mut self, responses: ResponseCache) -> Self {
        self.responses = Some(responses);
        self
    }

    pub fn with_limiter(mut self, limiter: TokenBucket) -> Self {
        self.limiter = Some(Arc::new(limiter));
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Builds every enabled component and starts one sweeper per store.
    ///
    /// Must be called from within a tokio runtime. The returned sweepers
    /// should be shut down when the server stops.
    pub fn from_config(config: &Config) -> Result<(Self, Vec<Sweeper>)> {
        let interval = Duration::from_secs(config.cleanup_interval);
        let mut state = Self::new().with_request_timeout(config.request_timeout);
        let mut sweepers = Vec::new();

        if config.cache.enabled {
            let (store, sweeper) =
                TtlCache::with_sweeper(config.cache.ttl, config.cache.max_size, interval, "store")?;
            state.store = Some(store);
            sweepers.push(sweeper);
            info!(
                "TTL store enabled: ttl={:?}, max_size={}",
                config.cache.ttl, config.cache.max_size
            );
        }

        if config.response_cache.enabled {
            let (responses, sweeper) = ResponseCache::with_sweeper(
                config.response_cache.ttl,
                config.response_cache.max_size,
                interval,
            )?;
            state.responses = Some(responses);
            sweepers.push(sweeper);
            info!(
                "Response cache enabled: ttl={:?}, max_size={}",
                config.response_cache.ttl, config.response_cache.max_size
            );
        }

        if config.rate_limit.enabled {
            state = state.with_limiter(TokenBucket::new(
                config.rate_limit.requests_per_sec,
                config.rate_limit.burst,
            ));
            info!(
                "Rate limiting enabled: rps={}, burst={}",
                config.rate_limit.requests_per_sec, config.rate_limit.burst
            );
        }

        Ok((state, sweepers))
    }
}
