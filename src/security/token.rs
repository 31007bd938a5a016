//! Time-based form token codec.
//!
//! The token encodes a single issuance timestamp as JSON wrapped in URL-safe
//! base64. It is deliberately unsigned: it filters unsophisticated bots that
//! submit forms faster than a human could, not targeted attackers, who can
//! trivially forge it. Signing would add key management for no gain against
//! the actual threat.
//!
//! Age rules:
//! - younger than the floor: likely a bot, reported as [`TokenVerdict::SubmittedTooFast`]
//! - older than the ceiling: a long-idle tab, benign, reported as [`TokenVerdict::Expired`]
//! - undecodable: [`TokenVerdict::Malformed`]

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::security::epoch_ms;

/// Payload carried inside the token.
#[derive(Debug, Serialize, Deserialize)]
struct TokenClaims {
    /// Issuance time, milliseconds since the Unix epoch.
    t: u64,
}

/// Outcome of validating a submitted token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenVerdict {
    Valid,
    /// Age below the floor: a human cannot fill a form this fast.
    SubmittedTooFast,
    /// Age above the ceiling. Benign, the submission proceeds.
    Expired,
    /// Not decodable as a token at all.
    Malformed,
}

/// Issue a fresh token stamped with the current time.
pub fn issue() -> String {
    encode(epoch_ms())
}

pub(crate) fn encode(issued_at_ms: u64) -> String {
    // Serializing a single-u64 struct cannot fail.
    let json = serde_json::to_vec(&TokenClaims { t: issued_at_ms }).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(json)
}

/// Decode a submitted token and judge its age against the configured window.
pub fn validate(token: &str, min_age: Duration, max_age: Duration) -> TokenVerdict {
    let Ok(bytes) = URL_SAFE_NO_PAD.decode(token) else {
        return TokenVerdict::Malformed;
    };
    let Ok(claims) = serde_json::from_slice::<TokenClaims>(&bytes) else {
        return TokenVerdict::Malformed;
    };

    let now = epoch_ms();
    // A timestamp from the future decodes fine but has no meaningful age;
    // treat it like a too-fast submission.
    let age = now.saturating_sub(claims.t);
    if claims.t > now || age < min_age.as_millis() as u64 {
        TokenVerdict::SubmittedTooFast
    } else if age > max_age.as_millis() as u64 {
        TokenVerdict::Expired
    } else {
        TokenVerdict::Valid
    }
}
