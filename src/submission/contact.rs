//! Contact form payload.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::security::sanitize;

use super::{is_valid_email, ValidationError};

/// Raw body of `POST /api/contact`, before any validation.
///
/// Every field is optional at this stage so that missing and present-but-bad
/// values produce distinct messages.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    /// Time-based form token minted at page render.
    #[serde(rename = "_token")]
    pub token: Option<String>,
    /// Honeypot decoy. Real browsers leave it absent.
    #[serde(rename = "website_url")]
    pub honeypot: Option<String>,
}

/// Contact submission topic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    #[default]
    General,
    Services,
    Partnership,
    Ngo,
    Other,
}

impl Subject {
    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::General => "general",
            Subject::Services => "services",
            Subject::Partnership => "partnership",
            Subject::Ngo => "ngo",
            Subject::Other => "other",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Subject {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "general" => Ok(Subject::General),
            "services" => Ok(Subject::Services),
            "partnership" => Ok(Subject::Partnership),
            "ngo" => Ok(Subject::Ngo),
            "other" => Ok(Subject::Other),
            _ => Err(ValidationError::UnknownSubject),
        }
    }
}

/// Validated, normalized contact submission. Free text is sanitized, email
/// lower-cased and trimmed; safe to log or hand downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Subject,
    pub message: String,
}

impl ContactForm {
    /// Check fields in order (name, email, phone, subject, message), then
    /// normalize. Returns the first violated rule.
    pub fn validate(&self) -> Result<ContactSubmission, ValidationError> {
        let name = self.name.as_deref().ok_or(ValidationError::NameMissing)?;
        let name_chars = name.chars().count();
        if name_chars < 2 {
            return Err(ValidationError::NameTooShort);
        }
        if name_chars > 100 {
            return Err(ValidationError::NameTooLong);
        }

        let email = self.email.as_deref().ok_or(ValidationError::EmailMissing)?;
        if !is_valid_email(email) {
            return Err(ValidationError::EmailInvalid);
        }
        if email.chars().count() > 255 {
            return Err(ValidationError::EmailTooLong);
        }

        if let Some(phone) = self.phone.as_deref() {
            if phone.chars().count() > 30 {
                return Err(ValidationError::PhoneTooLong);
            }
        }

        let subject = match self.subject.as_deref() {
            Some(raw) => raw.parse()?,
            None => Subject::default(),
        };

        let message = self
            .message
            .as_deref()
            .ok_or(ValidationError::MessageMissing)?;
        let message_chars = message.chars().count();
        if message_chars < 10 {
            return Err(ValidationError::MessageTooShort);
        }
        if message_chars > 5000 {
            return Err(ValidationError::MessageTooLong);
        }

        Ok(ContactSubmission {
            name: sanitize(name),
            email: email.trim().to_lowercase(),
            phone: self
                .phone
                .as_deref()
                .map(sanitize)
                .filter(|p| !p.is_empty()),
            subject,
            message: sanitize(message),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> ContactForm {
        ContactForm {
            name: Some("Nino Beridze".to_string()),
            email: Some("Nino@Example.com".to_string()),
            phone: Some("+995 555 123 456".to_string()),
            subject: Some("services".to_string()),
            message: Some("I would like to learn more about your services.".to_string()),
            ..ContactForm::default()
        }
    }

    #[test]
    fn valid_form_normalizes() {
        let submission = valid_form().validate().unwrap();
        assert_eq!(submission.name, "Nino Beridze");
        assert_eq!(submission.email, "nino@example.com");
        assert_eq!(submission.subject, Subject::Services);
        assert_eq!(submission.phone.as_deref(), Some("+995 555 123 456"));
    }

    #[test]
    fn first_failure_wins_in_field_order() {
        // Both name and message are bad; name is reported.
        let form = ContactForm {
            name: Some("A".to_string()),
            message: Some("short".to_string()),
            ..valid_form()
        };
        assert_eq!(form.validate(), Err(ValidationError::NameTooShort));
    }

    #[test]
    fn short_message_is_rejected() {
        let form = ContactForm {
            name: Some("Al".to_string()),
            email: Some("a@b.com".to_string()),
            message: Some("short".to_string()),
            ..ContactForm::default()
        };
        assert_eq!(form.validate(), Err(ValidationError::MessageTooShort));
    }

    #[test]
    fn missing_fields_are_reported_as_required() {
        let form = ContactForm::default();
        assert_eq!(form.validate(), Err(ValidationError::NameMissing));

        let form = ContactForm {
            name: Some("Nino".to_string()),
            ..ContactForm::default()
        };
        assert_eq!(form.validate(), Err(ValidationError::EmailMissing));
    }

    #[test]
    fn unknown_subject_is_rejected() {
        let form = ContactForm {
            subject: Some("complaints".to_string()),
            ..valid_form()
        };
        assert_eq!(form.validate(), Err(ValidationError::UnknownSubject));
    }

    #[test]
    fn subject_defaults_to_general() {
        let form = ContactForm {
            subject: None,
            ..valid_form()
        };
        assert_eq!(form.validate().unwrap().subject, Subject::General);
    }

    #[test]
    fn free_text_is_sanitized() {
        let form = ContactForm {
            name: Some("<b>Nino</b>".to_string()),
            message: Some("Hello <script>alert(1)</script> world".to_string()),
            ..valid_form()
        };
        let submission = form.validate().unwrap();
        assert_eq!(submission.name, "&lt;b&gt;Nino&lt;/b&gt;");
        assert!(!submission.message.contains('<'));
    }

    #[test]
    fn character_limits_count_chars_not_bytes() {
        // 50 Georgian letters are 150 UTF-8 bytes but well under the cap.
        let form = ContactForm {
            name: Some("ნ".repeat(50)),
            ..valid_form()
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn empty_phone_normalizes_to_none() {
        let form = ContactForm {
            phone: Some("  ".to_string()),
            ..valid_form()
        };
        assert_eq!(form.validate().unwrap().phone, None);
    }

    #[test]
    fn accepted_output_revalidates_unchanged() {
        let submission = valid_form().validate().unwrap();
        let resubmitted = ContactForm {
            name: Some(submission.name.clone()),
            email: Some(submission.email.clone()),
            phone: submission.phone.clone(),
            subject: Some(submission.subject.as_str().to_string()),
            message: Some(submission.message.clone()),
            ..ContactForm::default()
        };
        assert_eq!(resubmitted.validate().unwrap(), submission);
    }

    #[test]
    fn oversized_fields_are_rejected() {
        let form = ContactForm {
            name: Some("x".repeat(101)),
            ..valid_form()
        };
        assert_eq!(form.validate(), Err(ValidationError::NameTooLong));

        let form = ContactForm {
            message: Some("x".repeat(5001)),
            ..valid_form()
        };
        assert_eq!(form.validate(), Err(ValidationError::MessageTooLong));

        let form = ContactForm {
            phone: Some("1".repeat(31)),
            ..valid_form()
        };
        assert_eq!(form.validate(), Err(ValidationError::PhoneTooLong));
    }
}
