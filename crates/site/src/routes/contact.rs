//! Public contact form route.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use atelier_core::Email;

use crate::db::ContactRepository;
use crate::error::AppError;
use crate::models::NewSubmission;
use crate::state::AppState;

/// Upper bounds that keep a single submission from flooding the log or the
/// notification email.
const MAX_NAME_LENGTH: usize = 120;
const MAX_MESSAGE_LENGTH: usize = 5000;

/// Contact form payload.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Accept a contact form submission.
///
/// The submission is stored first; the two notification emails (owner
/// notification and submitter receipt) are sent afterwards in the
/// background and never affect the response. Success means "persisted",
/// not "delivered".
///
/// POST /api/contact
#[instrument(skip(state, form), fields(name = %form.name))]
pub async fn submit(
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let new = validate(form)?;

    let submission = ContactRepository::new(state.pool()).create(new).await?;
    tracing::info!(id = %submission.id, "contact submission stored");

    if let Some(email) = state.email() {
        let email = email.clone();
        let submission = submission.clone();
        tokio::spawn(async move {
            if let Err(e) = email.send_contact_notification(&submission).await {
                tracing::warn!(error = %e, id = %submission.id, "owner notification failed");
            }
            if let Err(e) = email.send_contact_receipt(&submission).await {
                tracing::warn!(error = %e, id = %submission.id, "submitter receipt failed");
            }
        });
    } else {
        tracing::debug!("SMTP not configured, skipping contact notifications");
    }

    Ok((
        StatusCode::OK,
        Json(json!({ "success": true, "submission": submission })),
    ))
}

/// Validate the raw form into a submission ready to persist.
fn validate(form: ContactForm) -> Result<NewSubmission, AppError> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("name is required".into()));
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(AppError::BadRequest(format!(
            "name must be at most {MAX_NAME_LENGTH} characters"
        )));
    }

    let email = Email::parse(&form.email)
        .map_err(|e| AppError::BadRequest(format!("invalid email address: {e}")))?;

    let message = form.message.trim();
    if message.is_empty() {
        return Err(AppError::BadRequest("message is required".into()));
    }
    if message.len() > MAX_MESSAGE_LENGTH {
        return Err(AppError::BadRequest(format!(
            "message must be at most {MAX_MESSAGE_LENGTH} characters"
        )));
    }

    Ok(NewSubmission {
        name: name.to_string(),
        email,
        message: message.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, message: &str) -> ContactForm {
        ContactForm {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_valid_form_is_trimmed() {
        let new = validate(form("  Jane ", "JANE@x.com", " hi ")).expect("valid");
        assert_eq!(new.name, "Jane");
        assert_eq!(new.email.as_str(), "jane@x.com");
        assert_eq!(new.message, "hi");
    }

    #[test]
    fn test_blank_name_rejected() {
        let err = validate(form("   ", "jane@x.com", "hi")).expect_err("blank name");
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_malformed_email_rejected() {
        let err = validate(form("Jane", "not-an-email", "hi")).expect_err("bad email");
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_blank_message_rejected() {
        let err = validate(form("Jane", "jane@x.com", "")).expect_err("blank message");
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_oversized_message_rejected() {
        let big = "x".repeat(MAX_MESSAGE_LENGTH + 1);
        let err = validate(form("Jane", "jane@x.com", &big)).expect_err("too long");
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
