use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};

use crate::domain::ContactEmail;

/// Client for the transactional email provider.
pub struct EmailClient {
    sender: String,
    http_client: Client,
    email_endpoint: Url,
    authorization_token: Secret<String>,
}

impl EmailClient {
    pub fn new(
        base_url: Url,
        sender: String,
        authorization_token: Secret<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, anyhow::Error> {
        let email_endpoint = base_url.join("/email")?;
        // one timeout for every call; the relay never retries
        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            email_endpoint,
            sender,
            authorization_token,
        })
    }

    pub async fn send_email(
        &self,
        recipient: &str,
        reply_to: &ContactEmail,
        subject: &str,
        html_content: &str,
        text_content: &str,
    ) -> Result<(), reqwest::Error> {
        let request_body = SendEmailRequest {
            from: &self.sender,
            to: recipient,
            reply_to: reply_to.as_ref(),
            subject,
            html_body: html_content,
            text_body: text_content,
        };

        self.http_client
            .post(self.email_endpoint.clone())
            .header(
                "X-Postmark-Server-Token",
                self.authorization_token.expose_secret(),
            )
            .json(&request_body)
            .send()
            .await?
            // `send` succeeds on any status the provider answers with
            .error_for_status()?;

        Ok(())
    }
}

#[derive(serde::Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    reply_to: &'a str,
    subject: &'a str,
    html_body: &'a str,
    text_body: &'a str,
}
