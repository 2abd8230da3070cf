use crate::domain::contact::DeliveryOutcome;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing required fields")]
    Validation,
    #[error("Mail provider error: {0}")]
    Provider(String),
    #[error("Contact log error: {0}")]
    Storage(#[from] std::io::Error),
    #[error("Internal server error")]
    Internal,
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// The terminal classification of the submission that produced this error.
    #[must_use]
    pub const fn outcome(&self) -> DeliveryOutcome {
        match self {
            Self::Validation => DeliveryOutcome::Rejected,
            Self::Provider(_) | Self::Storage(_) | Self::Internal => DeliveryOutcome::Failed,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let outcome = self.outcome();
        let (status, message) = match self {
            Self::Validation => {
                tracing::debug!(outcome = ?outcome, "Rejected incomplete submission");
                (StatusCode::BAD_REQUEST, "Missing required fields".to_string())
            }
            Self::Provider(e) => {
                tracing::error!(error = %e, outcome = ?outcome, "Mail provider call failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            Self::Storage(e) => {
                tracing::error!(error = %e, outcome = ?outcome, "Failed to save contact locally");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Email provider not configured and local save failed".to_string(),
                )
            }
            Self::Internal => {
                tracing::error!(outcome = ?outcome, "Internal server error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
