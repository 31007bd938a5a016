//! Client identity derivation for throttling.
//!
//! Identity comes from forwarded-address headers set by the fronting proxy:
//! the first `X-Forwarded-For` hop, else `X-Real-IP`, else the literal
//! `"unknown"`. This is a trust boundary: the value is client-spoofable, so
//! it groups requests for best-effort throttling and nothing more.

use axum::http::HeaderMap;

/// Identity every request from "unknown" clients shares one bucket under.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Derive the throttling identity for a request.
pub fn client_identity(headers: &HeaderMap) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        let real_ip = real_ip.trim();
        if !real_ip.is_empty() {
            return real_ip.to_string();
        }
    }

    UNKNOWN_CLIENT.to_string()
}
