//! Token bucket rate limiter.

use std::fmt;
use std::num::NonZeroU32;
use std::time::Duration;

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};

/// Slowest refill accepted; non-positive or non-finite rates fall back to it.
const MAX_PERIOD: Duration = Duration::from_secs(3600);
const MIN_PERIOD: Duration = Duration::from_nanos(1);

/// Process-wide admission gate backed by a GCRA limiter.
///
/// Starts full. Each allowed request takes one cell; cells come back at
/// `rate_per_sec` up to `burst`.
pub struct TokenBucket {
    rate_per_sec: f64,
    burst: NonZeroU32,
    limiter: DefaultDirectRateLimiter,
}

impl TokenBucket {
    /// A `burst` of zero is raised to one so the gate can ever open.
    pub fn new(rate_per_sec: f64, burst: u32) -> Self {
        let burst = NonZeroU32::new(burst).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::with_period(replenish_period(rate_per_sec))
            .unwrap_or_else(|| Quota::per_second(NonZeroU32::MIN))
            .allow_burst(burst);

        Self {
            rate_per_sec,
            burst,
            limiter: RateLimiter::direct(quota),
        }
    }

    /// Takes one cell if available.
    pub fn allow(&self) -> bool {
        self.limiter.check().is_ok()
    }
}

impl fmt::Debug for TokenBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenBucket")
            .field("rate_per_sec", &self.rate_per_sec)
            .field("burst", &self.burst)
            .finish()
    }
}

fn replenish_period(rate_per_sec: f64) -> Duration {
    Duration::try_from_secs_f64(1.0 / rate_per_sec)
        .map(|period| period.clamp(MIN_PERIOD, MAX_PERIOD))
        .unwrap_or(MAX_PERIOD)
}
