mod notification;
mod post;
mod preflight;

pub use notification::{sanitize, send_notification, Notification};
pub use post::{submit, ContactError};
pub use preflight::{method_not_allowed, preflight};
