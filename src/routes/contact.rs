use std::fmt::{Debug, Formatter};

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use serde_json::json;

use crate::domain::{ComposedEmail, ContactForm, ContactSubmission};
use crate::email_client::MailTransport;
use crate::routes::error_chain_fmt;

/// Address contact submissions are delivered to, resolved once at startup.
pub struct ContactRecipient(pub String);

#[derive(thiserror::Error)]
pub enum ContactError {
    #[error("Missing required fields")]
    ValidationError,
    #[error("Failed to send email")]
    SendError(#[source] anyhow::Error),
}

impl Debug for ContactError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for ContactError {
    fn status_code(&self) -> StatusCode {
        match self {
            ContactError::ValidationError => StatusCode::BAD_REQUEST,
            ContactError::SendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // `Display` carries only the generic client-facing string; the source
        // chain stays in the logs via the `Debug` implementation above.
        HttpResponse::build(self.status_code()).json(json!({
            "success": false,
            "error": self.to_string(),
        }))
    }
}

/// CORS preflight. Answered before any validation or transport work.
pub async fn contact_preflight() -> HttpResponse {
    HttpResponse::Ok().finish()
}

/// Service identity marker, handy for checking a deployment from a browser.
pub async fn contact_info() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Portfolio backend contact endpoint",
    }))
}

/// Catch-all for methods the contact endpoint does not support.
pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(json!({
        "success": false,
        "error": "Method not allowed",
    }))
}

#[tracing::instrument(
    name = "Relay a contact form submission",
    skip(body, mailer, recipient),
    fields(contact_email = tracing::field::Empty)
)]
pub async fn submit_contact(
    body: web::Bytes,
    mailer: web::Data<dyn MailTransport>,
    recipient: web::Data<ContactRecipient>,
) -> Result<HttpResponse, ContactError> {
    // A missing or malformed body is treated as an empty field set and falls
    // through to the required-field check.
    let form: ContactForm = serde_json::from_slice(&body).unwrap_or_default();

    let submission =
        ContactSubmission::parse(form).map_err(|_| ContactError::ValidationError)?;
    tracing::Span::current().record(
        "contact_email",
        tracing::field::display(submission.email()),
    );

    let email = ComposedEmail::from_submission(&submission);

    // Exactly one send attempt per valid submission; the outcome is awaited
    // before a response is produced.
    mailer
        .send(&recipient.0, email)
        .await
        .map_err(ContactError::SendError)?;

    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}
