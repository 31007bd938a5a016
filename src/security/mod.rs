//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming submission:
//!     → rate_limit/ (admission gate, per client identity)
//!     → honeypot.rs (decoy field check)
//!     → token.rs (time-based token check)
//!     → sanitize.rs (escape free text during validation)
//!     → Pass to submission validator
//! ```
//!
//! # Design Decisions
//! - Fail closed on admission: a rate-limit map at capacity denies
//! - Bot detections are masked as success, never surfaced as errors
//! - No trust in client input, including forwarded-for headers

pub mod honeypot;
pub mod rate_limit;
pub mod sanitize;
pub mod token;

pub use honeypot::is_honeypot_triggered;
pub use rate_limit::{RateLimitResult, RateLimiter};
pub use sanitize::sanitize;
pub use token::TokenVerdict;

use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch.
pub(crate) fn epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
