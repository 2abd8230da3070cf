use crate::adapters::contact_log::ContactLog;
use crate::adapters::mail::{MailMessage, Mailer};
use crate::config::MailConfig;
use crate::domain::contact::{ContactLogEntry, DeliveryOutcome, Submission};
use crate::error::{AppError, Result};
use std::sync::Arc;
use time::OffsetDateTime;

/// Decides the delivery path for one submission and produces its outcome.
///
/// When a mailer is present the submission is relayed to the provider;
/// otherwise it is appended to the local contact log. A provider that is
/// configured but failing is reported as an error, never silently degraded
/// to the local log.
#[derive(Clone, Debug)]
pub struct ContactService {
    mailer: Option<Arc<dyn Mailer>>,
    log: Arc<ContactLog>,
    config: MailConfig,
}

impl ContactService {
    #[must_use]
    pub fn new(mailer: Option<Arc<dyn Mailer>>, log: Arc<ContactLog>, config: MailConfig) -> Self {
        Self { mailer, log, config }
    }

    /// Handles one submission end to end.
    ///
    /// # Errors
    /// Returns `AppError::Validation` if any field is empty, before any side
    /// effect. Returns `AppError::Provider` or `AppError::Storage` when the
    /// chosen delivery path fails.
    pub async fn submit(&self, submission: Submission) -> Result<DeliveryOutcome> {
        if !submission.is_complete() {
            return Err(AppError::Validation);
        }

        match self.mailer.as_ref() {
            Some(mailer) => self.deliver(mailer, submission).await,
            None => self.save_locally(submission).await,
        }
    }

    async fn deliver(&self, mailer: &Arc<dyn Mailer>, submission: Submission) -> Result<DeliveryOutcome> {
        let mail = contact_mail(&self.config, &submission);
        mailer.send(&mail).await.map_err(|e| AppError::Provider(e.to_string()))?;

        if self.config.autoreply {
            self.spawn_autoreply(mailer, &submission);
        }

        Ok(DeliveryOutcome::Delivered)
    }

    /// Best-effort thank-you reply to the submitter. Detached so a slow or
    /// failing autoreply never delays or fails the primary response; errors
    /// are only logged.
    fn spawn_autoreply(&self, mailer: &Arc<dyn Mailer>, submission: &Submission) {
        let mailer = Arc::clone(mailer);
        let mail = autoreply_mail(&self.config, submission);
        let recipient = submission.email.clone();

        tokio::spawn(async move {
            if let Err(e) = mailer.send(&mail).await {
                tracing::warn!(error = %e, recipient = %recipient, "Autoreply send failed");
            }
        });
    }

    async fn save_locally(&self, submission: Submission) -> Result<DeliveryOutcome> {
        let entry = ContactLogEntry::new(submission, OffsetDateTime::now_utc());
        self.log.append(entry).await?;

        tracing::warn!("Mail provider not configured, saved contact to the local log");
        Ok(DeliveryOutcome::SavedLocally)
    }
}

fn contact_mail(config: &MailConfig, submission: &Submission) -> MailMessage {
    MailMessage {
        from: config.sender_address(),
        to: config.receiver.clone(),
        reply_to: Some(submission.email.clone()),
        subject: format!("Portfolio contact from {}", submission.name),
        text_body: format!(
            "Name: {}\nEmail: {}\n\n{}",
            submission.name, submission.email, submission.message
        ),
        html_body: Some(format!(
            "<p><strong>Name:</strong> {}</p><p><strong>Email:</strong> {}</p><div>{}</div>",
            submission.name, submission.email, submission.message
        )),
    }
}

fn autoreply_mail(config: &MailConfig, submission: &Submission) -> MailMessage {
    MailMessage {
        from: config.sender_address(),
        to: submission.email.clone(),
        reply_to: None,
        subject: format!("Thanks for contacting {}", config.owner_name),
        text_body: format!(
            "Thanks {},\n\nI received your message and will get back to you shortly.\n\n\u{2014} {}",
            submission.name, config.owner_name
        ),
        html_body: None,
    }
}
