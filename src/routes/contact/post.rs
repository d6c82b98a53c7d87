use std::fmt::{Debug, Formatter};

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use anyhow::Context;

use crate::domain::{validate_submission, Submission, ValidationErrors};
use crate::email_client::EmailClient;
use crate::error_handling::error_chain_fmt;
use crate::routes::contact::send_notification;
use crate::startup::Recipient;

#[derive(thiserror::Error)]
pub enum ContactError {
    #[error("Invalid JSON in request body")]
    InvalidJson(#[source] serde_json::Error),
    #[error("Validation failed")]
    ValidationError(#[source] ValidationErrors),
    // the cause stays in the logs, the caller only ever sees this message
    #[error("Failed to send message. Please try again or contact us directly.")]
    SendError(#[source] anyhow::Error),
}

impl Debug for ContactError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[derive(serde::Serialize)]
struct ErrorBody<'a> {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a ValidationErrors>,
}

impl ResponseError for ContactError {
    fn status_code(&self) -> StatusCode {
        match self {
            ContactError::InvalidJson(_) | ContactError::ValidationError(_) => {
                StatusCode::BAD_REQUEST
            }
            ContactError::SendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let errors = match self {
            ContactError::ValidationError(errors) => Some(errors),
            _ => None,
        };
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
            errors,
        })
    }
}

#[derive(serde::Serialize)]
struct Confirmation {
    message: &'static str,
}

fn message_sent() -> HttpResponse {
    HttpResponse::Ok().json(Confirmation {
        message: "Message sent successfully",
    })
}

#[tracing::instrument(
    name = "Relaying a contact form submission",
    skip(body, email_client, recipient),
    fields(contact_email = tracing::field::Empty, contact_name = tracing::field::Empty)
)]
pub async fn submit(
    body: web::Bytes,
    email_client: web::Data<EmailClient>,
    recipient: web::Data<Recipient>,
) -> Result<HttpResponse, ContactError> {
    // an empty body is read as `null` and rejected by validation, not by the parser
    let input: serde_json::Value = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).map_err(ContactError::InvalidJson)?
    };

    let submission = match validate_submission(&input).map_err(ContactError::ValidationError)? {
        Submission::Genuine(submission) => submission,
        Submission::Honeypot(_) => {
            tracing::info!("Honeypot triggered, dropping the submission");
            return Ok(message_sent());
        }
    };
    tracing::Span::current()
        .record("contact_email", &tracing::field::display(&submission.email))
        .record("contact_name", &tracing::field::display(&submission.name));

    send_notification(&email_client, &recipient.0, &submission)
        .await
        .context("Failed to send the contact form notification")
        .map_err(|e| {
            tracing::error!(error.cause_chain = ?e, "Relaying the submission failed");
            ContactError::SendError(e)
        })?;

    tracing::info!("Contact form submission relayed");
    Ok(message_sent())
}
