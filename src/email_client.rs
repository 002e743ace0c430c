use crate::domain::SubmitterEmail;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};

/// Thin client for SendGrid's `v3/mail/send` API.
pub struct EmailClient {
    http_client: Client,
    base_url: String,
    sender: SubmitterEmail,
    sender_name: String,
    api_key: Secret<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum SendEmailError {
    #[error("Failed to issue the send request to SendGrid.")]
    Transport(#[from] reqwest::Error),
    #[error("SendGrid rejected the send request (status {status}). Response: {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },
}

impl EmailClient {
    pub fn new(
        base_url: String,
        sender: SubmitterEmail,
        sender_name: String,
        api_key: Secret<String>,
        timeout: std::time::Duration,
    ) -> Self {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build the reqwest client.");
        Self {
            http_client,
            base_url,
            sender,
            sender_name,
            api_key,
        }
    }

    pub async fn send_email(
        &self,
        recipient: &SubmitterEmail,
        reply_to: &SubmitterEmail,
        subject: &str,
        html_body: &str,
    ) -> Result<(), SendEmailError> {
        let url = format!("{}/v3/mail/send", self.base_url);
        let request_body = SendEmailRequest {
            personalizations: [Personalization {
                to: [Address {
                    email: recipient.as_ref(),
                    name: None,
                }],
            }],
            from: Address {
                email: self.sender.as_ref(),
                name: Some(&self.sender_name),
            },
            reply_to: Address {
                email: reply_to.as_ref(),
                name: None,
            },
            subject,
            content: [Content {
                content_type: "text/html",
                value: html_body,
            }],
        };
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            // SendGrid reports the reason as a JSON `errors` array; relay it
            // verbatim so the caller can surface it.
            let body = response.text().await.unwrap_or_default();
            Err(SendEmailError::Rejected { status, body })
        }
    }
}

#[derive(serde::Serialize)]
struct SendEmailRequest<'a> {
    personalizations: [Personalization<'a>; 1],
    from: Address<'a>,
    reply_to: Address<'a>,
    subject: &'a str,
    content: [Content<'a>; 1],
}

#[derive(serde::Serialize)]
struct Personalization<'a> {
    to: [Address<'a>; 1],
}

#[derive(serde::Serialize)]
struct Address<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(serde::Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    content_type: &'a str,
    value: &'a str,
}
