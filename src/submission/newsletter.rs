//! Newsletter subscription payload.

use serde::{Deserialize, Serialize};

use crate::security::sanitize;

use super::{is_valid_email, ValidationError};

/// Raw body of `POST /api/newsletter`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsletterForm {
    pub email: Option<String>,
    pub name: Option<String>,
}

/// Validated newsletter subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsletterSubscription {
    pub email: String,
    pub name: Option<String>,
}

impl NewsletterForm {
    /// Check email then name; first failure wins.
    pub fn validate(&self) -> Result<NewsletterSubscription, ValidationError> {
        let email = self.email.as_deref().ok_or(ValidationError::EmailMissing)?;
        if !is_valid_email(email) {
            return Err(ValidationError::EmailInvalid);
        }
        if email.chars().count() > 255 {
            return Err(ValidationError::EmailTooLong);
        }

        if let Some(name) = self.name.as_deref() {
            if name.chars().count() > 100 {
                return Err(ValidationError::NameTooLong);
            }
        }

        Ok(NewsletterSubscription {
            email: email.trim().to_lowercase(),
            name: self
                .name
                .as_deref()
                .map(sanitize)
                .filter(|n| !n.is_empty()),
        })
    }
}
