use once_cell::sync::Lazy;
use regex::Regex;

use super::FieldError;

// local-part@domain.tld, no whitespace and no extra `@` in any segment
static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactEmail(String);

impl ContactEmail {
    /// Checks the raw input against the address shape and stores it trimmed and lowercased.
    ///
    /// The shape is tested against the input as submitted, so leading or trailing
    /// whitespace makes an otherwise well-formed address invalid.
    pub fn parse(s: Option<String>) -> Result<ContactEmail, FieldError> {
        let raw = match s {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Err(FieldError::new("email", "Email is required")),
        };
        if !EMAIL_SHAPE.is_match(&raw) {
            return Err(FieldError::new(
                "email",
                "Please enter a valid email address",
            ));
        }
        Ok(Self(raw.trim().to_lowercase()))
    }
}

impl AsRef<str> for ContactEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContactEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
