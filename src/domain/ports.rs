use crate::domain::model::Envelope;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Text generation backend (chat completion).
#[async_trait]
pub trait Generator: Send + Sync {
    /// Sends a single user-role prompt and returns the first completion's text.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Outbound mail submission. One call is one session: connect, authenticate, send, quit.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn submit(&self, envelope: &Envelope) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_key(&self) -> &str;
    fn generation_endpoint(&self) -> &str;
    fn model(&self) -> &str;
    fn temperature(&self) -> f64;
    fn generation_timeout(&self) -> Duration;
    fn sender(&self) -> &str;
    fn sender_password(&self) -> &str;
    fn smtp_host(&self) -> &str;
    fn smtp_port(&self) -> u16;
    fn smtp_timeout(&self) -> Duration;
}
