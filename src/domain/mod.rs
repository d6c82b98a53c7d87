mod contact_email;
mod contact_form;
mod contact_message;
mod contact_name;
mod field_error;
mod submission;

pub use contact_email::ContactEmail;
pub use contact_form::{ContactForm, FormField, FormStatus};
pub use contact_message::ContactMessage;
pub use contact_name::ContactName;
pub use field_error::{FieldError, ValidationErrors};
pub use submission::{validate_submission, ContactSubmission, Submission};
