//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files, and
//! every field has a default so an empty file is a working config.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration for the form gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Request body limits.
    pub limits: LimitsConfig,

    /// Rate limiting configuration.
    pub rate_limit: RateLimitConfig,

    /// Form token age window.
    pub token: TokenConfig,

    /// Optional shared rate-limit store.
    pub redis: RedisConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Whole-request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 15 }
    }
}

/// Request size limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum accepted request body, in bytes. A contact message caps at
    /// 5000 characters, so this leaves generous multi-byte headroom.
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 64 * 1024,
        }
    }
}

/// Admission limits for one endpoint.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct EndpointLimit {
    /// Requests admitted per window per client identity.
    pub max_requests: u32,

    /// Window length in seconds.
    pub window_secs: u64,
}

impl EndpointLimit {
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

impl Default for EndpointLimit {
    fn default() -> Self {
        Self {
            max_requests: 3,
            window_secs: 600,
        }
    }
}

/// Rate limiting configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Cap on tracked client identities in the in-memory limiter.
    pub max_entries: usize,

    /// Interval between sweeps of expired in-memory entries, in seconds.
    pub sweep_interval_secs: u64,

    /// Contact endpoint limits.
    pub contact: EndpointLimit,

    /// Newsletter endpoint limits.
    pub newsletter: EndpointLimit,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_entries: 10_000,
            sweep_interval_secs: 60,
            contact: EndpointLimit::default(),
            newsletter: EndpointLimit::default(),
        }
    }
}

/// Form token age window.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TokenConfig {
    /// Submissions younger than this are treated as automated.
    pub min_age_ms: u64,

    /// Tokens older than this are expired (benign).
    pub max_age_ms: u64,
}

impl TokenConfig {
    pub fn min_age(&self) -> Duration {
        Duration::from_millis(self.min_age_ms)
    }

    pub fn max_age(&self) -> Duration {
        Duration::from_millis(self.max_age_ms)
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            min_age_ms: 2_000,
            max_age_ms: 3_600_000,
        }
    }
}

/// Shared rate-limit store settings. Absent `url` means in-memory only.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RedisConfig {
    /// Connection URL (e.g., "redis://:password@host:6379/"). Credentials
    /// ride inside the URL.
    pub url: Option<String>,

    /// Prefix for rate-limit keys in the store.
    pub key_prefix: String,

    /// Per-call timeout in milliseconds before falling back to in-memory.
    pub call_timeout_ms: u64,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: None,
            key_prefix: "ratelimit:".to_string(),
            call_timeout_ms: 500,
        }
    }
}

/// Observability settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Emit JSON-formatted logs (production) instead of pretty text.
    pub log_json: bool,

    /// Enable the Prometheus exposition endpoint.
    pub metrics_enabled: bool,

    /// Address the metrics endpoint binds to.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_json: false,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
