use serde_json::{Map, Value};

use super::{ContactEmail, ContactMessage, ContactName, FieldError, ValidationErrors};

/// A well-formed enquiry, ready to be relayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: ContactName,
    pub email: ContactEmail,
    pub phone: Option<String>,
    pub service: Option<String>,
    pub message: ContactMessage,
}

/// The outcome of validating a request body that passed every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Genuine(ContactSubmission),
    /// The hidden honeypot field was filled in. Callers must answer as if the
    /// message was delivered and do nothing else.
    Honeypot(String),
}

/// Validates an untrusted JSON record.
///
/// Every field rule runs independently and all failures are reported together,
/// unless the honeypot is filled in, in which case no other rule is evaluated.
/// Values that are not JSON strings are treated as missing.
pub fn validate_submission(input: &Value) -> Result<Submission, ValidationErrors> {
    let record = match input.as_object() {
        Some(record) => record,
        None => {
            return Err(ValidationErrors::new(vec![FieldError::new(
                "body",
                "Invalid request body",
            )]))
        }
    };

    if let Some(honeypot) = string_field(record, "honeypot") {
        if !honeypot.trim().is_empty() {
            return Ok(Submission::Honeypot(honeypot));
        }
    }

    let name = ContactName::parse(string_field(record, "name"));
    let email = ContactEmail::parse(string_field(record, "email"));
    let message = ContactMessage::parse(string_field(record, "message"));

    match (name, email, message) {
        (Ok(name), Ok(email), Ok(message)) => Ok(Submission::Genuine(ContactSubmission {
            name,
            email,
            phone: optional_field(record, "phone"),
            service: optional_field(record, "service"),
            message,
        })),
        (name, email, message) => {
            let errors = [name.err(), email.err(), message.err()]
                .into_iter()
                .flatten()
                .collect();
            Err(ValidationErrors::new(errors))
        }
    }
}

fn string_field(record: &Map<String, Value>, key: &str) -> Option<String> {
    record.get(key).and_then(Value::as_str).map(str::to_owned)
}

fn optional_field(record: &Map<String, Value>, key: &str) -> Option<String> {
    string_field(record, key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
