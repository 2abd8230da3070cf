use crate::adapters::mail::{MailError, MailMessage, Mailer};
use async_trait::async_trait;
use serde::Serialize;

/// Mailer backed by the SendGrid v3 mail send API.
#[derive(Debug, Clone)]
pub struct SendGridMailer {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
}

impl SendGridMailer {
    #[must_use]
    pub fn new(api_base: &str, api_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl Mailer for SendGridMailer {
    async fn send(&self, mail: &MailMessage) -> Result<(), MailError> {
        let payload = SendRequest::from_message(mail);

        let res = self
            .client
            .post(format!("{}/v3/mail/send", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(MailError::Status { status: status.as_u16(), body });
        }

        Ok(())
    }
}

// Wire format of POST /v3/mail/send.

#[derive(Debug, Serialize)]
struct SendRequest {
    personalizations: Vec<Personalization>,
    from: EmailAddress,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<EmailAddress>,
    subject: String,
    content: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Personalization {
    to: Vec<EmailAddress>,
}

#[derive(Debug, Serialize)]
struct EmailAddress {
    email: String,
}

#[derive(Debug, Serialize)]
struct Content {
    r#type: String,
    value: String,
}

impl SendRequest {
    fn from_message(mail: &MailMessage) -> Self {
        let mut content = vec![Content { r#type: "text/plain".to_string(), value: mail.text_body.clone() }];
        if let Some(html) = &mail.html_body {
            content.push(Content { r#type: "text/html".to_string(), value: html.clone() });
        }

        Self {
            personalizations: vec![Personalization { to: vec![EmailAddress { email: mail.to.clone() }] }],
            from: EmailAddress { email: mail.from.clone() },
            reply_to: mail.reply_to.as_ref().map(|email| EmailAddress { email: email.clone() }),
            subject: mail.subject.clone(),
            content,
        }
    }
}
