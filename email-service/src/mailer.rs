use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use secrecy::ExposeSecret;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use thiserror::Error;

use crate::config::SmtpConfig;

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("invalid recipient: {0}")]
    InvalidRecipient(String),

    #[error("send error: {0}")]
    SendFailed(String),
}

/// Outbound mail transport. One send attempt, no retry, no queueing.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Dispatch an HTML email and return the transport's message id.
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<String, MailerError>;
}

pub struct SmtpMailer {
    config: SmtpConfig,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(config: SmtpConfig) -> Result<Self, MailerError> {
        let creds = Credentials::new(
            config.user.clone(),
            config.password.expose_secret().clone(),
        );

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| {
                MailerError::Configuration(format!("failed to create SMTP relay: {}", e))
            })?
            .port(config.port)
            .credentials(creds)
            .build();

        Ok(Self { config, transport })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<String, MailerError> {
        let from: Mailbox = format!("{} <{}>", self.config.from_name, self.config.from_email)
            .parse()
            .map_err(|e| MailerError::Configuration(format!("invalid from address: {}", e)))?;

        let to: Mailbox = to
            .parse()
            .map_err(|e| MailerError::InvalidRecipient(format!("invalid recipient: {}", e)))?;

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html.to_string())
            .map_err(|e| MailerError::SendFailed(format!("failed to build message: {}", e)))?;

        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| MailerError::SendFailed(format!("failed to send email: {}", e)))?;

        let message_id = response
            .message()
            .next()
            .map(str::to_string)
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        Ok(message_id)
    }
}

/// A dispatched email captured by the mock mailer.
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Mock transport for tests and SMTP-disabled deployments.
#[derive(Default)]
pub struct MockMailer {
    outbox: Mutex<Vec<SentEmail>>,
    send_count: AtomicU64,
}

impl MockMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.outbox.lock().expect("outbox poisoned").clone()
    }

    pub fn send_count(&self) -> u64 {
        self.send_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<String, MailerError> {
        self.outbox.lock().expect("outbox poisoned").push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            html: html.to_string(),
        });
        let n = self.send_count.fetch_add(1, Ordering::SeqCst) + 1;

        tracing::info!(to, subject, "[MOCK] email would be sent");

        Ok(format!("mock-email-{}", n))
    }
}
