use chrono::{DateTime, Utc};

use crate::domain::ContactSubmission;
use crate::email_client::EmailClient;

const NOT_PROVIDED: &str = "Not provided";
const NOT_SPECIFIED: &str = "Not specified";

const STYLE: &str = r#"body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; }
    .container { max-width: 600px; margin: 0 auto; padding: 20px; }
    .header { background-color: #1e3a5f; color: white; padding: 20px; text-align: center; }
    .content { padding: 20px; background-color: #f9f9f9; }
    .field { margin-bottom: 15px; }
    .label { font-weight: bold; color: #1e3a5f; }
    .message { background-color: white; padding: 15px; border-left: 4px solid #e07c3e; margin-top: 10px; }
    .footer { text-align: center; padding: 15px; font-size: 12px; color: #666; }"#;

/// Entity-encodes the characters that would let user input open or close markup.
pub fn sanitize(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '<' => sanitized.push_str("&lt;"),
            '>' => sanitized.push_str("&gt;"),
            '"' => sanitized.push_str("&quot;"),
            '\'' => sanitized.push_str("&#x27;"),
            c => sanitized.push(c),
        }
    }
    sanitized
}

/// The email sent to the business owner for one enquiry.
#[derive(Debug)]
pub struct Notification {
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

impl Notification {
    pub fn build(submission: &ContactSubmission, submitted_at: DateTime<Utc>) -> Self {
        let timestamp = submitted_at.format("%d/%m/%Y, %H:%M:%S UTC").to_string();
        let name = submission.name.as_ref();
        let email = submission.email.as_ref();
        let message = submission.message.as_ref();

        let subject = format!("New Contact Form Submission - {}", sanitize(name));

        let text_body = format!(
            "New contact form submission:\n\
             \n\
             Name: {name}\n\
             Email: {email}\n\
             Phone: {phone}\n\
             Service: {service}\n\
             \n\
             Message:\n\
             {message}\n\
             \n\
             ---\n\
             Submitted: {timestamp}",
            phone = submission.phone.as_deref().unwrap_or(NOT_PROVIDED),
            service = submission.service.as_deref().unwrap_or(NOT_SPECIFIED),
        );

        let phone_html = match &submission.phone {
            Some(phone) => {
                let phone = sanitize(phone);
                format!(r#"<a href="tel:{phone}">{phone}</a>"#)
            }
            None => NOT_PROVIDED.to_string(),
        };
        let service_html = submission
            .service
            .as_deref()
            .map(sanitize)
            .unwrap_or_else(|| NOT_SPECIFIED.to_string());

        let html_body = format!(
            r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <style>
    {STYLE}
  </style>
</head>
<body>
  <div class="container">
    <div class="header">
      <h1>New Contact Form Submission</h1>
    </div>
    <div class="content">
      <div class="field">
        <span class="label">Name:</span> {name}
      </div>
      <div class="field">
        <span class="label">Email:</span> <a href="mailto:{email}">{email}</a>
      </div>
      <div class="field">
        <span class="label">Phone:</span> {phone_html}
      </div>
      <div class="field">
        <span class="label">Service Interested In:</span> {service_html}
      </div>
      <div class="field">
        <span class="label">Message:</span>
        <div class="message">{message}</div>
      </div>
    </div>
    <div class="footer">
      Submitted: {timestamp}
    </div>
  </div>
</body>
</html>"#,
            name = sanitize(name),
            email = sanitize(email),
            message = sanitize(message).replace('\n', "<br>"),
        );

        Self {
            subject,
            text_body,
            html_body,
        }
    }
}

/// Builds the notification for `submission` and sends it to `recipient`,
/// with the submitter as reply-to. A single attempt.
#[tracing::instrument(
    name = "Send a contact form notification",
    skip(email_client, submission)
)]
pub async fn send_notification(
    email_client: &EmailClient,
    recipient: &str,
    submission: &ContactSubmission,
) -> Result<(), reqwest::Error> {
    let notification = Notification::build(submission, Utc::now());
    email_client
        .send_email(
            recipient,
            &submission.email,
            &notification.subject,
            &notification.html_body,
            &notification.text_body,
        )
        .await
}
