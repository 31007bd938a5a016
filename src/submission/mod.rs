//! Submission payloads and validation.
//!
//! # Data Flow
//! ```text
//! Parsed request body (raw form)
//!     → contact.rs / newsletter.rs (field checks, first failure wins)
//!     → sanitize free text, normalize email
//!     → normalized submission (safe to log and forward)
//! ```
//!
//! # Design Decisions
//! - Checks run in a fixed field order and stop at the first failure; the
//!   client gets one actionable message, never an aggregate
//! - Validation is stateless: a normalized submission revalidates cleanly
//! - Limits are counted in characters, not bytes; submissions arrive in
//!   Georgian and Russian as often as English

pub mod contact;
pub mod newsletter;

pub use contact::{ContactForm, ContactSubmission, Subject};
pub use newsletter::{NewsletterForm, NewsletterSubscription};

/// First field rule a payload violated, in check order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Name is required")]
    NameMissing,
    #[error("Name must be at least 2 characters")]
    NameTooShort,
    #[error("Name too long")]
    NameTooLong,
    #[error("Email is required")]
    EmailMissing,
    #[error("Invalid email address")]
    EmailInvalid,
    #[error("Email too long")]
    EmailTooLong,
    #[error("Phone number too long")]
    PhoneTooLong,
    #[error("Invalid subject")]
    UnknownSubject,
    #[error("Message is required")]
    MessageMissing,
    #[error("Message must be at least 10 characters")]
    MessageTooShort,
    #[error("Message too long")]
    MessageTooLong,
}

/// Structural email check: one `@` separating non-empty parts, a dotted
/// domain, no whitespace. Deliverability is the mail system's problem.
pub(crate) fn is_valid_email(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last@sub.example.org"));
    }

    #[test]
    fn rejects_structural_garbage() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("a@"));
        assert!(!is_valid_email("a@nodot"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a@example."));
        assert!(!is_valid_email("a b@example.com"));
    }
}
