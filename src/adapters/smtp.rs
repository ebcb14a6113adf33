use crate::core::{ConfigProvider, Envelope, MailTransport};
use crate::utils::error::{ComposerError, Result};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;

pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// STARTTLS submission with password authentication.
///
/// A transport is built for every message and dropped afterwards, so each
/// submission opens and closes its own session.
#[derive(Clone)]
pub struct SmtpMailer {
    host: String,
    port: u16,
    username: String,
    password: String,
    timeout: Duration,
}

impl SmtpMailer {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            username: username.into(),
            password: password.into(),
            timeout,
        }
    }

    /// Authenticates as the sender mailbox.
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(
            config.smtp_host(),
            config.smtp_port(),
            config.sender(),
            config.sender_password(),
            config.smtp_timeout(),
        )
    }

    pub fn build_message(envelope: &Envelope) -> Result<Message> {
        let from: Mailbox = envelope.from.parse().map_err(|e| {
            ComposerError::delivery(format!("invalid sender address {}: {}", envelope.from, e))
        })?;
        let to: Mailbox = envelope.to.parse().map_err(|e| {
            ComposerError::delivery(format!("invalid recipient address {}: {}", envelope.to, e))
        })?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(envelope.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(envelope.body.clone())
            .map_err(|e| ComposerError::delivery(format!("failed to build message: {}", e)))
    }

    fn build_transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.host)
            .map_err(|e| ComposerError::delivery(e.to_string()))?
            .port(self.port)
            .credentials(Credentials::new(
                self.username.clone(),
                self.password.clone(),
            ))
            .timeout(Some(self.timeout))
            .build();
        Ok(transport)
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn submit(&self, envelope: &Envelope) -> Result<()> {
        let message = Self::build_message(envelope)?;
        let transport = self.build_transport()?;

        tracing::debug!("Opening SMTP session to {}:{}", self.host, self.port);
        let response = transport
            .send(message)
            .await
            .map_err(|e| ComposerError::delivery(e.to_string()))?;

        tracing::debug!("SMTP relay answered {}", response.code());
        Ok(())
    }
}
