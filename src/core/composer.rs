use crate::core::dispatcher::{DeliveryStatus, Dispatcher};
use crate::core::transformer::Transformer;
use crate::core::validator::ensure_allowed_recipient;
use crate::core::{ComposedMessage, Draft, Generator, MailTransport};
use crate::utils::error::{ComposerError, Result};

/// Runs the validate → transform → deliver pipeline for the two user actions.
///
/// The last composed message is not held here: callers own an
/// `Option<ComposedMessage>` slot, fill it from [`Composer::preview`] and pass it
/// to [`Composer::send`], which consumes it on success.
pub struct Composer<G: Generator, T: MailTransport> {
    transformer: Transformer<G>,
    dispatcher: Dispatcher<T>,
}

impl<G: Generator, T: MailTransport> Composer<G, T> {
    pub fn new(transformer: Transformer<G>, dispatcher: Dispatcher<T>) -> Self {
        Self {
            transformer,
            dispatcher,
        }
    }

    pub async fn preview(&self, draft: &Draft) -> Result<ComposedMessage> {
        if draft.body.is_empty() {
            return Err(ComposerError::missing_field("body"));
        }
        ensure_allowed_recipient(&draft.recipient_address)?;

        tracing::info!("Generating poetic version for {}", draft.recipient_address);
        self.transformer.compose(&draft.subject, &draft.body).await
    }

    /// Sends the cached body, or a freshly composed one when the slot is empty.
    /// The subject always comes from the current draft.
    ///
    /// On delivery failure the composed message stays in `cache` so a retry does
    /// not regenerate it.
    pub async fn send(&self, draft: &Draft, cache: &mut Option<ComposedMessage>) -> Result<()> {
        ensure_allowed_recipient(&draft.recipient_address)?;
        if draft.subject.is_empty() {
            return Err(ComposerError::missing_field("subject"));
        }
        if draft.body.is_empty() {
            return Err(ComposerError::missing_field("body"));
        }

        let composed = match cache.take() {
            Some(cached) => {
                tracing::debug!("Using previously generated poetic version");
                cached
            }
            None => {
                tracing::info!("Generating poetic version for {}", draft.recipient_address);
                self.transformer.compose(&draft.subject, &draft.body).await?
            }
        };

        match self
            .dispatcher
            .deliver(&draft.recipient_address, &draft.subject, &composed.body)
            .await
        {
            DeliveryStatus::Sent => {
                tracing::info!("Email sent to {}", draft.recipient_address);
                Ok(())
            }
            DeliveryStatus::Failed(reason) => {
                *cache = Some(composed);
                Err(ComposerError::delivery(reason))
            }
        }
    }
}
