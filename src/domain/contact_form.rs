use std::collections::{BTreeMap, BTreeSet};

use serde_json::{json, Value};

use super::{validate_submission, ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Name,
    Email,
    Phone,
    Service,
    Message,
    Honeypot,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Phone => "phone",
            FormField::Service => "service",
            FormField::Message => "message",
            FormField::Honeypot => "honeypot",
        }
    }

    fn from_field_name(name: &str) -> Option<Self> {
        match name {
            "name" => Some(FormField::Name),
            "email" => Some(FormField::Email),
            "phone" => Some(FormField::Phone),
            "service" => Some(FormField::Service),
            "message" => Some(FormField::Message),
            "honeypot" => Some(FormField::Honeypot),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error,
}

/// Browser-side state of the contact form.
///
/// Gives inline feedback using the same validator the relay enforces. Only the
/// relay's verdict is authoritative.
#[derive(Debug, Default)]
pub struct ContactForm {
    values: BTreeMap<FormField, String>,
    errors: BTreeMap<FormField, &'static str>,
    touched: BTreeSet<FormField>,
    status: FormStatus,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn value(&self, field: FormField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn is_touched(&self, field: FormField) -> bool {
        self.touched.contains(&field)
    }

    /// The error recorded for `field`, shown only once the user has left it.
    pub fn visible_error(&self, field: FormField) -> Option<&'static str> {
        if self.is_touched(field) {
            self.errors.get(&field).copied()
        } else {
            None
        }
    }

    /// Typing into a field clears its error.
    pub fn change(&mut self, field: FormField, value: impl Into<String>) {
        self.values.insert(field, value.into());
        self.errors.remove(&field);
    }

    pub fn blur(&mut self, field: FormField) {
        self.touched.insert(field);
        if let Some(message) = self.current_errors().remove(&field) {
            self.errors.insert(field, message);
        }
    }

    /// Returns the JSON payload to post to the relay, or `None` when nothing
    /// should be sent.
    pub fn submit(&mut self) -> Option<Value> {
        if !self.value(FormField::Honeypot).is_empty() {
            // bots get the same panel a person would
            self.status = FormStatus::Success;
            return None;
        }

        let errors = self.current_errors();
        if !errors.is_empty() {
            self.errors = errors;
            self.touched
                .extend([FormField::Name, FormField::Email, FormField::Message]);
            return None;
        }

        self.status = FormStatus::Submitting;
        Some(self.payload())
    }

    pub fn submission_succeeded(&mut self) {
        self.status = FormStatus::Success;
    }

    pub fn submission_failed(&mut self) {
        self.status = FormStatus::Error;
    }

    /// "Send another message": back to a blank, idle form.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn payload(&self) -> Value {
        json!({
            "name": self.value(FormField::Name),
            "email": self.value(FormField::Email),
            "phone": self.value(FormField::Phone),
            "service": self.value(FormField::Service),
            "message": self.value(FormField::Message),
            "honeypot": self.value(FormField::Honeypot),
        })
    }

    fn current_errors(&self) -> BTreeMap<FormField, &'static str> {
        let mut payload = self.payload();
        if let Some(record) = payload.as_object_mut() {
            record.remove(FormField::Honeypot.as_str());
        }
        match validate_submission(&payload) {
            Ok(_) => BTreeMap::new(),
            Err(errors) => by_field(&errors),
        }
    }
}

fn by_field(errors: &ValidationErrors) -> BTreeMap<FormField, &'static str> {
    errors
        .errors()
        .iter()
        .filter_map(|e| FormField::from_field_name(e.field).map(|field| (field, e.message)))
        .collect()
}
