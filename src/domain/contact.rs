use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// One contact-form submission as received from the client.
#[derive(Debug, Clone)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl Submission {
    /// All three fields must be non-empty before any side effect happens.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.email.is_empty() && !self.message.is_empty()
    }
}

/// Terminal classification of one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The mail provider accepted the message.
    Delivered,
    /// No provider configured; the submission was appended to the contact log.
    SavedLocally,
    /// Input failed validation; no side effect occurred.
    Rejected,
    /// The provider call or the local save failed.
    Failed,
}

/// One persisted record in the local contact log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactLogEntry {
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(with = "time::serde::rfc3339")]
    pub received_at: OffsetDateTime,
    pub saved_locally: bool,
}

impl ContactLogEntry {
    #[must_use]
    pub fn new(submission: Submission, received_at: OffsetDateTime) -> Self {
        Self {
            name: submission.name,
            email: submission.email,
            message: submission.message,
            received_at,
            saved_locally: true,
        }
    }
}
