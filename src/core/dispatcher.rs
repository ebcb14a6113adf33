use crate::core::{Envelope, MailTransport};
use crate::utils::error::ComposerError;

/// Outcome of a single submission. SMTP acceptance counts as `Sent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStatus {
    Sent,
    Failed(String),
}

impl DeliveryStatus {
    pub fn is_sent(&self) -> bool {
        matches!(self, DeliveryStatus::Sent)
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            DeliveryStatus::Sent => None,
            DeliveryStatus::Failed(reason) => Some(reason.as_str()),
        }
    }
}

pub struct Dispatcher<T: MailTransport> {
    transport: T,
    sender: String,
}

impl<T: MailTransport> Dispatcher<T> {
    pub fn new(transport: T, sender: impl Into<String>) -> Self {
        Self {
            transport,
            sender: sender.into(),
        }
    }

    /// Submits one plain-text message. Failures are reported in the status, never raised.
    pub async fn deliver(&self, to: &str, subject: &str, body: &str) -> DeliveryStatus {
        let envelope = Envelope {
            from: self.sender.clone(),
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        };

        tracing::debug!("Submitting message to {}", to);
        match self.transport.submit(&envelope).await {
            Ok(()) => {
                tracing::info!("Message to {} accepted by relay", to);
                DeliveryStatus::Sent
            }
            Err(e) => {
                tracing::error!("Error sending email to {}: {}", to, e);
                let reason = match e {
                    ComposerError::DeliveryError { message } => message,
                    other => other.to_string(),
                };
                DeliveryStatus::Failed(reason)
            }
        }
    }
}
