use anyhow::Context as _;
use reqwest::Client;
use serde_json::json;
use tracing::info;

use crate::domain::repository::Mailer;
use crate::domain::types::MailMessage;
use crate::error::AccountsServiceError;

/// Posts mail to an HTTP relay as `{from, to, subject, text}`.
#[derive(Clone)]
pub struct HttpMailer {
    pub client: Client,
    pub endpoint: String,
    pub from: String,
}

impl Mailer for HttpMailer {
    async fn send(&self, message: &MailMessage) -> Result<(), AccountsServiceError> {
        self.client
            .post(&self.endpoint)
            .json(&json!({
                "from": self.from,
                "to": message.recipients,
                "subject": message.subject,
                "text": message.body,
            }))
            .send()
            .await
            .context("send mail request")?
            .error_for_status()
            .context("mail relay rejected message")?;
        Ok(())
    }
}

/// Development transport: records the envelope in the log, never the body.
#[derive(Clone, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    async fn send(&self, message: &MailMessage) -> Result<(), AccountsServiceError> {
        info!(
            subject = %message.subject,
            recipients = ?message.recipients,
            "mail relay not configured; message logged only"
        );
        Ok(())
    }
}

/// Transport chosen at startup from `MAIL_API_URL`.
#[derive(Clone)]
pub enum MailTransport {
    Http(HttpMailer),
    Log(LogMailer),
}

impl MailTransport {
    pub fn from_config(client: Client, endpoint: Option<&str>, from: &str) -> Self {
        match endpoint {
            Some(endpoint) => Self::Http(HttpMailer {
                client,
                endpoint: endpoint.to_owned(),
                from: from.to_owned(),
            }),
            None => Self::Log(LogMailer),
        }
    }
}

impl Mailer for MailTransport {
    async fn send(&self, message: &MailMessage) -> Result<(), AccountsServiceError> {
        match self {
            Self::Http(mailer) => mailer.send(message).await,
            Self::Log(mailer) => mailer.send(message).await,
        }
    }
}
