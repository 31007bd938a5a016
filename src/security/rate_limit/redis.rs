//! Redis-backed distributed rate limiting.
//!
//! When several gateway instances serve the same site, the shared store is
//! the single source of truth for submission counts. Counting runs as one
//! server-side script, so increments stay atomic across instances without
//! client-side coordination.
//!
//! Every call is bounded by a timeout. Errors and timeouts bubble up to the
//! caller, which downgrades to the in-memory strategy for that call; a Redis
//! outage degrades throttling precision, never availability.

use std::time::Duration;

use redis::aio::ConnectionManager;
use redis::{Client, RedisError, Script};

use crate::security::epoch_ms;

use super::RateLimitResult;

/// Increment the key's counter, arming the window TTL on first touch, and
/// report the counter together with the remaining window.
const COUNT_SCRIPT: &str = r#"
local count = redis.call('INCR', KEYS[1])
if count == 1 then
  redis.call('PEXPIRE', KEYS[1], ARGV[1])
end
local ttl = redis.call('PTTL', KEYS[1])
return {count, ttl}
"#;

/// Window counter delegated to a shared Redis instance.
pub struct RedisRateLimiter {
    connection: ConnectionManager,
    script: Script,
    key_prefix: String,
    call_timeout: Duration,
}

impl RedisRateLimiter {
    /// Connect to the store. Fails fast so the caller can fall back to the
    /// in-memory limiter at startup.
    pub async fn connect(
        url: &str,
        key_prefix: String,
        call_timeout: Duration,
    ) -> Result<Self, RedisError> {
        let client = Client::open(url)?;
        let connection = ConnectionManager::new(client).await?;
        Ok(Self {
            connection,
            script: Script::new(COUNT_SCRIPT),
            key_prefix,
            call_timeout,
        })
    }

    /// Count a request against `key`'s window in the shared store.
    pub async fn check(
        &self,
        key: &str,
        max_requests: u32,
        window: Duration,
    ) -> Result<RateLimitResult, RedisError> {
        // ConnectionManager clones share the underlying multiplexed channel.
        let mut conn = self.connection.clone();
        let invocation = async {
            self.script
                .key(format!("{}{}", self.key_prefix, key))
                .arg(window.as_millis() as u64)
                .invoke_async::<(u64, i64)>(&mut conn)
                .await
        };

        let (count, ttl_ms) = tokio::time::timeout(self.call_timeout, invocation)
            .await
            .map_err(|_| {
                RedisError::from((
                    redis::ErrorKind::IoError,
                    "rate limit store call timed out",
                ))
            })??;

        let now = epoch_ms();
        // PTTL reports -1/-2 for unarmed or missing keys; treat either as a
        // window starting now.
        let reset_at = if ttl_ms > 0 {
            now + ttl_ms as u64
        } else {
            now + window.as_millis() as u64
        };

        Ok(RateLimitResult {
            allowed: count <= u64::from(max_requests),
            remaining: u64::from(max_requests).saturating_sub(count) as u32,
            reset_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connect_to_unreachable_store_fails_fast() {
        let result = RedisRateLimiter::connect(
            "redis://127.0.0.1:1/",
            "ratelimit:".to_string(),
            Duration::from_millis(500),
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn invalid_url_is_rejected() {
        let result = RedisRateLimiter::connect(
            "not-a-redis-url",
            "ratelimit:".to_string(),
            Duration::from_millis(500),
        )
        .await;
        assert!(result.is_err());
    }
}
