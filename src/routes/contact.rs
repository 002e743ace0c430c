use crate::domain::{ContactMessage, SubmitterEmail};
use crate::email_client::{EmailClient, SendEmailError};
use crate::startup::EmailDelivery;
use crate::util::{error_chain_fmt, NonEmptyString};
use actix_web::http::StatusCode;
use actix_web::{post, web, HttpResponse, ResponseError};
use anyhow::Context;
use askama::Template;
use std::fmt;
use std::fmt::Formatter;

#[derive(serde::Deserialize)]
pub struct FormData {
    name: String,
    email: String,
    subject: String,
    message: String,
}

impl TryFrom<FormData> for ContactMessage {
    type Error = String;
    fn try_from(value: FormData) -> Result<Self, Self::Error> {
        // Presence of all four fields is checked before the email shape,
        // so an empty email reads as "missing", not "malformed".
        let missing = |_| "All fields are required".to_string();
        let name = NonEmptyString::try_from(value.name).map_err(missing)?;
        let subject = NonEmptyString::try_from(value.subject).map_err(missing)?;
        let message = NonEmptyString::try_from(value.message).map_err(missing)?;
        if value.email.is_empty() {
            return Err("All fields are required".to_string());
        }
        let email =
            SubmitterEmail::parse(value.email).map_err(|_| "Invalid email format".to_string())?;
        Ok(Self {
            name,
            email,
            subject,
            message,
        })
    }
}

#[derive(thiserror::Error)]
pub enum ContactError {
    #[error(
        "SendGrid API key is not configured. \
        Please set the APP_EMAIL__SENDGRID_API_KEY environment variable."
    )]
    MissingApiKey,
    #[error(
        "Contact email is not configured. \
        Please set the APP_EMAIL__RECIPIENT environment variable."
    )]
    MissingRecipient,
    #[error("{0}")]
    Validation(String),
    #[error("SendGrid error: {0}")]
    Provider(#[source] SendEmailError),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl fmt::Debug for ContactError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        error_chain_fmt(&self, f)
    }
}

impl ResponseError for ContactError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::MissingApiKey | Self::MissingRecipient => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Provider(_) | Self::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "success": false,
            "error": self.to_string(),
        }))
    }
}

#[post("/api/contact")]
#[tracing::instrument(name = "Handle a contact form submission", skip(payload, delivery))]
pub async fn contact(
    payload: Result<web::Json<FormData>, actix_web::Error>,
    delivery: web::Data<EmailDelivery>,
) -> Result<HttpResponse, ContactError> {
    // Operator-facing failures are checked before looking at the payload.
    let email_client = delivery.client.as_ref().ok_or_else(|| {
        tracing::error!("Rejecting submission: the SendGrid API key is not configured.");
        ContactError::MissingApiKey
    })?;
    let recipient = delivery.recipient.as_ref().ok_or_else(|| {
        tracing::error!("Rejecting submission: the contact recipient is not configured.");
        ContactError::MissingRecipient
    })?;

    // A body missing any of the four fields fails JSON extraction.
    let payload = payload
        .map_err(|_| ContactError::Validation("All fields are required".to_string()))?
        .0;
    let message: ContactMessage = payload.try_into().map_err(ContactError::Validation)?;

    send_contact_email(email_client, recipient, &message).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Email sent successfully",
    })))
}

#[derive(Template)]
#[template(path = "contact_email.html")]
struct ContactEmailTemplate<'a> {
    name: &'a str,
    email: &'a str,
    subject: &'a str,
    message: &'a str,
}

#[tracing::instrument(
    name = "Relay a contact message via email",
    skip(email_client, recipient, message),
    fields(submitter_email = %message.email)
)]
async fn send_contact_email(
    email_client: &EmailClient,
    recipient: &SubmitterEmail,
    message: &ContactMessage,
) -> Result<(), ContactError> {
    let subject = format!("New Contact Form Submission: {}", message.subject.as_ref());
    let html_body = ContactEmailTemplate {
        name: message.name.as_ref(),
        email: message.email.as_ref(),
        subject: message.subject.as_ref(),
        message: message.message.as_ref(),
    }
    .render()
    .context("Failed to render the contact email body.")?;

    email_client
        .send_email(recipient, &message.email, &subject, &html_body)
        .await
        .map_err(|e| {
            tracing::error!(error.cause_chain = ?e, "Failed to relay the submission to SendGrid.");
            ContactError::Provider(e)
        })
}
