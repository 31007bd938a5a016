//! Configuration validation.
//!
//! Semantic checks on top of serde's syntactic ones: value ranges, address
//! parseability, ordering constraints. Returns all violations, not just the
//! first, so an operator can fix a config in one pass.

use std::net::SocketAddr;

use crate::config::schema::GatewayConfig;

/// A single semantic violation in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a valid socket address")]
    InvalidBindAddress(String),
    #[error("observability.metrics_address {0:?} is not a valid socket address")]
    InvalidMetricsAddress(String),
    #[error("rate_limit.{0}.max_requests must be at least 1")]
    ZeroMaxRequests(&'static str),
    #[error("rate_limit.{0}.window_secs must be at least 1")]
    ZeroWindow(&'static str),
    #[error("rate_limit.max_entries must be at least 1")]
    ZeroMaxEntries,
    #[error("rate_limit.sweep_interval_secs must be at least 1")]
    ZeroSweepInterval,
    #[error("token.min_age_ms must be below token.max_age_ms")]
    TokenAgeOrder,
    #[error("redis.call_timeout_ms must be at least 1")]
    ZeroRedisTimeout,
    #[error("limits.max_body_bytes must be at least 1")]
    ZeroBodyLimit,
}

/// Validate a parsed configuration.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    for (name, limit) in [
        ("contact", &config.rate_limit.contact),
        ("newsletter", &config.rate_limit.newsletter),
    ] {
        if limit.max_requests == 0 {
            errors.push(ValidationError::ZeroMaxRequests(name));
        }
        if limit.window_secs == 0 {
            errors.push(ValidationError::ZeroWindow(name));
        }
    }

    if config.rate_limit.max_entries == 0 {
        errors.push(ValidationError::ZeroMaxEntries);
    }
    if config.rate_limit.sweep_interval_secs == 0 {
        errors.push(ValidationError::ZeroSweepInterval);
    }
    if config.token.min_age_ms >= config.token.max_age_ms {
        errors.push(ValidationError::TokenAgeOrder);
    }
    if config.redis.call_timeout_ms == 0 {
        errors.push(ValidationError::ZeroRedisTimeout);
    }
    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
