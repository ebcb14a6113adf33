use serde::{Deserialize, Serialize};

/// User-entered message before it is rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub recipient_address: String,
    pub subject: String,
    pub body: String,
}

impl Draft {
    pub fn new(
        recipient_address: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            recipient_address: recipient_address.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Subject/body pair after rewriting, ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposedMessage {
    pub subject: String,
    pub body: String,
}

/// Plain-text message handed to a mail transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}
