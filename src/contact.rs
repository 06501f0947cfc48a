//! Contact form: field validation and the mailto link it falls back to.
//!
//! There is no backend, so a valid form becomes a `mailto:` URL the user's
//! mail client can open.

use std::sync::LazyLock;

use regex::Regex;

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 50;
const MESSAGE_MIN: usize = 10;
const MESSAGE_MAX: usize = 1000;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// A single field failing validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactError {
    #[error("Name must be at least 2 characters long")]
    NameTooShort,

    #[error("Name must be less than 50 characters")]
    NameTooLong,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Message must be at least 10 characters long")]
    MessageTooShort,

    #[error("Message must be less than 1000 characters")]
    MessageTooLong,
}

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn validate_name(&self) -> Result<(), ContactError> {
        match self.name.trim().chars().count() {
            n if n < NAME_MIN => Err(ContactError::NameTooShort),
            n if n > NAME_MAX => Err(ContactError::NameTooLong),
            _ => Ok(()),
        }
    }

    pub fn validate_email(&self) -> Result<(), ContactError> {
        if EMAIL.is_match(self.email.trim()) {
            Ok(())
        } else {
            Err(ContactError::InvalidEmail)
        }
    }

    pub fn validate_message(&self) -> Result<(), ContactError> {
        match self.message.trim().chars().count() {
            n if n < MESSAGE_MIN => Err(ContactError::MessageTooShort),
            n if n > MESSAGE_MAX => Err(ContactError::MessageTooLong),
            _ => Ok(()),
        }
    }

    /// Check every field, collecting all failures.
    pub fn validate(&self) -> Result<(), Vec<ContactError>> {
        let errors: Vec<ContactError> = [
            self.validate_name(),
            self.validate_email(),
            self.validate_message(),
        ]
        .into_iter()
        .filter_map(Result::err)
        .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Build the `mailto:` link for a valid form addressed to `recipient`.
    pub fn mailto(&self, recipient: &str) -> Result<String, Vec<ContactError>> {
        self.validate()?;

        let name = self.name.trim();
        let email = self.email.trim();
        let message = self.message.trim();

        let subject = format!("Hello from {name}");
        let body = format!("{message}\n\nBest regards,\n{name}\n{email}");
        Ok(format!(
            "mailto:{recipient}?subject={}&body={}",
            urlencoding::encode(&subject),
            urlencoding::encode(&body),
        ))
    }
}
