//! Mail Transport Abstraction
//!
//! Outbound mail delivery behind a trait so use cases stay independent
//! of the transport. Two implementations are provided:
//! - `SmtpMailer`: real delivery over SMTP (lettre, rustls)
//! - `TracingMailer`: logs the message instead of sending (development)

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::header::ContentType,
    transport::smtp::authentication::Credentials,
};
use thiserror::Error;

/// Mail delivery errors
#[derive(Debug, Error)]
pub enum MailError {
    #[error("Invalid mail address or message: {0}")]
    InvalidMessage(String),

    #[error("SMTP transport error: {0}")]
    Transport(String),
}

/// Outbound mail sender
#[trait_variant::make(Mailer: Send)]
pub trait LocalMailer {
    /// Send a plain text message
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError>;
}

/// SMTP mailer configuration
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// From address, e.g. "24 Cine Crafts <noreply@example.com>"
    pub from: String,
}

/// Real SMTP delivery via lettre
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, MailError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
            .map_err(|e| MailError::Transport(e.to_string()))?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            from: config.from.clone(),
        })
    }
}

impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        let message = Message::builder()
            .from(
                self.from
                    .parse()
                    .map_err(|e| MailError::InvalidMessage(format!("from: {e}")))?,
            )
            .to(to
                .parse()
                .map_err(|e| MailError::InvalidMessage(format!("to: {e}")))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| MailError::InvalidMessage(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        Ok(())
    }
}

/// Development mailer that logs instead of sending
#[derive(Debug, Clone, Default)]
pub struct TracingMailer;

impl Mailer for TracingMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        tracing::info!(to = %to, subject = %subject, body = %body, "mail (not sent)");
        Ok(())
    }
}

/// Transport selected at startup
///
/// Enum dispatch keeps the `Mailer` trait usable without boxing
/// (the trait is not object safe).
#[derive(Clone)]
pub enum AnyMailer {
    Smtp(SmtpMailer),
    Tracing(TracingMailer),
}

impl Mailer for AnyMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        match self {
            AnyMailer::Smtp(mailer) => Mailer::send(mailer, to, subject, body).await,
            AnyMailer::Tracing(mailer) => Mailer::send(mailer, to, subject, body).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_tracing_mailer_always_succeeds() {
        let mailer = TracingMailer;
        let result = Mailer::send(&mailer, "applicant@example.com", "Test", "Hello").await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_any_mailer_delegates() {
        let mailer = AnyMailer::Tracing(TracingMailer);
        let result = Mailer::send(&mailer, "applicant@example.com", "Test", "Hello").await;
        assert!(result.is_ok());
    }
}
