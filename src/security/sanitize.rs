//! Free-text input sanitization.
//!
//! # Responsibilities
//! - Neutralize markup injection in user-supplied text before it is logged
//!   or handed to any downstream consumer
//! - Trim surrounding whitespace
//!
//! # Design Decisions
//! - Escape, don't strip: the original text stays recoverable
//! - Ampersand is replaced first so the entities introduced by the later
//!   substitutions are not double-escaped
//! - Not idempotent: a second pass double-escapes `&`. Callers sanitize
//!   exactly once, at ingress.

/// Escape the five HTML-significant characters and trim whitespace.
///
/// Total function: never fails, any input produces a sanitized output.
pub fn sanitize(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
        .trim()
        .to_string()
}
