//! Honeypot field detection.
//!
//! The submission forms carry a decoy field (`website_url`) hidden from human
//! users via layout. Unsophisticated bots fill every field they find; a
//! non-empty value marks the submission as automated. The orchestrator masks
//! triggered submissions as successful so the bot operator gets no signal
//! that detection happened.

/// Returns true iff the decoy field is present and non-empty.
pub fn is_honeypot_triggered(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_field_is_clean() {
        assert!(!is_honeypot_triggered(None));
    }

    #[test]
    fn empty_field_is_clean() {
        assert!(!is_honeypot_triggered(Some("")));
    }

    #[test]
    fn filled_field_triggers() {
        assert!(is_honeypot_triggered(Some("https://spam.example")));
    }

    #[test]
    fn whitespace_counts_as_filled() {
        // Real browsers never populate the hidden field at all; any content,
        // including whitespace, is a bot tell.
        assert!(is_honeypot_triggered(Some(" ")));
    }
}
