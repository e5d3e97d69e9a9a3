//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Settings shared by both cache layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Whether the layer is built at all
    pub enabled: bool,
    /// Lifetime of every entry
    pub ttl: Duration,
    /// Maximum number of entries
    pub max_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl: Duration::from_secs(300),
            max_size: 1000,
        }
    }
}

/// Token bucket parameters for the admission gate.
#[derive(Debug, Clone, PartialEq)]
pub struct RateLimitConfig {
    pub enabled: bool,
    /// Sustained refill rate in tokens per second
    pub requests_per_sec: f64,
    /// Bucket capacity
    pub burst: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            requests_per_sec: 100.0,
            burst: 200,
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Background sweep interval in seconds
    pub cleanup_interval: u64,
    /// Longest a request may take before it is answered with `408`
    pub request_timeout: Duration,
    /// Generic key/value store used by handlers
    pub cache: StoreConfig,
    /// Whole-response cache
    pub response_cache: StoreConfig,
    pub rate_limit: RateLimitConfig,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 60)
    /// - `REQUEST_TIMEOUT` - Per-request deadline in seconds (default: 15)
    /// - `CACHE_ENABLED`, `CACHE_TTL`, `CACHE_MAX_SIZE` - generic store
    /// - `RESPONSE_CACHE_ENABLED`, `RESPONSE_CACHE_TTL`, `RESPONSE_CACHE_MAX_SIZE`
    /// - `RATE_LIMIT_ENABLED`, `RATE_LIMIT_RPS`, `RATE_LIMIT_BURST`
    ///
    /// Missing, unparseable or non-positive values keep their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_port: positive("SERVER_PORT").unwrap_or(defaults.server_port),
            cleanup_interval: positive("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
            request_timeout: positive::<u64>("REQUEST_TIMEOUT")
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            cache: store_from_env("CACHE", defaults.cache),
            response_cache: store_from_env("RESPONSE_CACHE", defaults.response_cache),
            rate_limit: RateLimitConfig {
                enabled: parse_env("RATE_LIMIT_ENABLED").unwrap_or(defaults.rate_limit.enabled),
                requests_per_sec: parse_env::<f64>("RATE_LIMIT_RPS")
                    .filter(|rps| *rps > 0.0)
                    .unwrap_or(defaults.rate_limit.requests_per_sec),
                burst: positive("RATE_LIMIT_BURST").unwrap_or(defaults.rate_limit.burst),
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8080,
            cleanup_interval: 60,
            request_timeout: Duration::from_secs(15),
            cache: StoreConfig::default(),
            response_cache: StoreConfig::default(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

fn store_from_env(prefix: &str, defaults: StoreConfig) -> StoreConfig {
    StoreConfig {
        enabled: parse_env(&format!("{prefix}_ENABLED")).unwrap_or(defaults.enabled),
        ttl: positive::<u64>(&format!("{prefix}_TTL"))
            .map(Duration::from_secs)
            .unwrap_or(defaults.ttl),
        max_size: positive(&format!("{prefix}_MAX_SIZE")).unwrap_or(defaults.max_size),
    }
}

fn parse_env<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn positive<T: FromStr + PartialOrd + Default>(name: &str) -> Option<T> {
    parse_env::<T>(name).filter(|v| *v > T::default())
}
