use crate::core::{ComposedMessage, Generator};
use crate::utils::error::Result;

/// Instructional prompt with subject and body interpolated verbatim.
pub fn build_prompt(subject: &str, body: &str) -> String {
    format!(
        "Transform this email into a poetic yet professional message.\n\
         Keep the core message but make it more elegant and artistic.\n\
         \n\
         Subject: {subject}\n\
         Content: {body}\n\
         \n\
         Make sure to:\n\
         1. Keep it professional\n\
         2. Maintain the original message\n\
         3. Add poetic elements\n\
         4. Structure it beautifully\n"
    )
}

pub struct Transformer<G: Generator> {
    generator: G,
}

impl<G: Generator> Transformer<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Rewrites the body; the subject passes through unchanged.
    pub async fn compose(&self, subject: &str, body: &str) -> Result<ComposedMessage> {
        let prompt = build_prompt(subject, body);
        tracing::debug!("Requesting poetic rewrite ({} prompt chars)", prompt.len());

        let rewritten = self.generator.generate(&prompt).await.inspect_err(|e| {
            tracing::error!("Generation failed: {}", e);
        })?;

        tracing::info!("Generated poetic version ({} chars)", rewritten.len());
        Ok(ComposedMessage {
            subject: subject.to_string(),
            body: rewritten,
        })
    }
}
