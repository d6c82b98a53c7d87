use super::FieldError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage(String);

impl ContactMessage {
    pub const MIN_LENGTH: usize = 10;

    /// Returns the trimmed message if it is present and at least `MIN_LENGTH`
    /// UTF-16 code units long, the length a browser reports for the same text.
    pub fn parse(s: Option<String>) -> Result<ContactMessage, FieldError> {
        let trimmed = match s.as_deref().map(str::trim) {
            Some(trimmed) if !trimmed.is_empty() => trimmed,
            _ => return Err(FieldError::new("message", "Message is required")),
        };
        // an emoji counts twice and a combining accent counts on its own
        if trimmed.encode_utf16().count() < Self::MIN_LENGTH {
            return Err(FieldError::new(
                "message",
                "Message must be at least 10 characters",
            ));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl AsRef<str> for ContactMessage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
