use crate::api::AppState;
use crate::api::schemas::{ContactRequest, ContactResponse};
use crate::domain::contact::{DeliveryOutcome, Submission};
use crate::error::{AppError, Result};
use axum::{Json, body::Bytes, extract::State, response::IntoResponse};

/// Accepts one contact-form submission.
///
/// The body is taken as raw bytes and parsed here so that a malformed
/// document is reported through the uniform error envelope rather than a
/// transport-level rejection.
///
/// # Errors
/// Returns `AppError::Validation` for missing or empty fields and
/// `AppError::Internal` for an unparseable body.
pub async fn submit_contact(State(state): State<AppState>, body: Bytes) -> Result<impl IntoResponse> {
    let request: ContactRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::error!(error = %e, "Malformed contact request body");
        AppError::Internal
    })?;

    let submission = Submission { name: request.name, email: request.email, message: request.message };
    let outcome = state.contact_service.submit(submission).await?;
    tracing::info!(outcome = ?outcome, "Contact submission handled");

    let saved = match outcome {
        DeliveryOutcome::SavedLocally => Some("local"),
        _ => None,
    };
    Ok(Json(ContactResponse { ok: true, saved }))
}
