use async_trait::async_trait;
use thiserror::Error;

pub mod sendgrid;

#[derive(Error, Debug)]
pub enum MailError {
    #[error("provider returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// One outbound email, provider-agnostic.
#[derive(Debug, Clone)]
pub struct MailMessage {
    pub from: String,
    pub to: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub text_body: String,
    pub html_body: Option<String>,
}

#[async_trait]
pub trait Mailer: Send + Sync + std::fmt::Debug {
    /// Performs one send call to the provider.
    ///
    /// # Errors
    /// Returns `MailError::Status` on a non-success provider response and
    /// `MailError::Transport` if the call never completed.
    async fn send(&self, mail: &MailMessage) -> Result<(), MailError>;
}
