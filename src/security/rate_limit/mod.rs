//! Submission rate limiting.
//!
//! # Responsibilities
//! - Bound submission frequency per client identity and endpoint
//! - Share limits across instances when a Redis store is configured
//! - Never fail a request because the store is unreachable
//!
//! # Design Decisions
//! - One service object owns both strategies; the store-backed strategy is
//!   selected at construction when credentials are configured, and every
//!   individual call that hits a transport error falls back to the in-memory
//!   strategy instead of surfacing a failure
//! - The in-memory map is capacity-capped and fails closed when full, so
//!   spoofed identities cannot grow it without bound

pub mod local;
pub mod redis;

pub use self::local::LocalRateLimiter;
pub use self::redis::RedisRateLimiter;

use std::time::Duration;

use crate::config::{RateLimitConfig, RedisConfig};
use crate::security::epoch_ms;

/// Outcome of an admission check. Pure output, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitResult {
    pub allowed: bool,
    /// Requests left in the current window.
    pub remaining: u32,
    /// End of the current window, milliseconds since the Unix epoch.
    pub reset_at: u64,
}

impl RateLimitResult {
    /// Seconds until the window resets, rounded up. Used for `Retry-After`.
    pub fn retry_after_secs(&self) -> u64 {
        self.reset_at.saturating_sub(epoch_ms()).div_ceil(1000)
    }
}

/// Admission gate for untrusted submissions.
///
/// Constructed once per process and shared via `Arc`. Owns the lifecycle of
/// the in-memory sweeper task; call [`RateLimiter::shutdown`] on teardown.
pub struct RateLimiter {
    redis: Option<RedisRateLimiter>,
    local: LocalRateLimiter,
}

impl RateLimiter {
    /// Build the limiter from configuration.
    ///
    /// A configured Redis URL activates the distributed strategy. A missing
    /// URL, or a failed initial connection, silently leaves the in-memory
    /// strategy as the sole one.
    pub async fn from_config(rate: &RateLimitConfig, redis: &RedisConfig) -> Self {
        let distributed = match &redis.url {
            Some(url) => {
                match RedisRateLimiter::connect(
                    url,
                    redis.key_prefix.clone(),
                    Duration::from_millis(redis.call_timeout_ms),
                )
                .await
                {
                    Ok(limiter) => {
                        tracing::info!("Distributed rate limiting enabled");
                        Some(limiter)
                    }
                    Err(e) => {
                        tracing::warn!(
                            error = %e,
                            "Rate limit store unreachable at startup, using in-memory limiter"
                        );
                        None
                    }
                }
            }
            None => None,
        };

        Self {
            redis: distributed,
            local: LocalRateLimiter::new(
                rate.max_entries,
                Duration::from_secs(rate.sweep_interval_secs),
            ),
        }
    }

    /// In-memory-only limiter, used by tests and credential-less deployments.
    pub fn in_memory(max_entries: usize, sweep_interval: Duration) -> Self {
        Self {
            redis: None,
            local: LocalRateLimiter::new(max_entries, sweep_interval),
        }
    }

    /// Check whether a request for `key` is admitted within the window.
    ///
    /// The store-backed strategy is authoritative when available; a transport
    /// error downgrades that single call to the in-memory strategy.
    pub async fn check(&self, key: &str, max_requests: u32, window: Duration) -> RateLimitResult {
        if let Some(redis) = &self.redis {
            match redis.check(key, max_requests, window).await {
                Ok(result) => return result,
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        key = %key,
                        "Rate limit store error, falling back to in-memory"
                    );
                }
            }
        }
        self.local.check(key, max_requests, window)
    }

    /// Cancel the background sweeper. Idempotent.
    pub fn shutdown(&self) {
        self.local.shutdown();
    }
}
