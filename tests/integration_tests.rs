use anyhow::Result;
use async_trait::async_trait;
use httpmock::prelude::*;
use poetic_mail::core::{Envelope, Generator, MailTransport};
use poetic_mail::{
    ComposedMessage, Composer, ComposerError, Dispatcher, Draft, OpenAiGenerator, Transformer,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const POETIC_BODY: &str = "A poetic notice: let us convene on Tuesday's gentle morn.";

#[derive(Clone, Default)]
struct RecordingTransport {
    sent: Arc<Mutex<Vec<Envelope>>>,
}

impl RecordingTransport {
    fn sent(&self) -> Vec<Envelope> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailTransport for RecordingTransport {
    async fn submit(&self, envelope: &Envelope) -> poetic_mail::Result<()> {
        self.sent.lock().unwrap().push(envelope.clone());
        Ok(())
    }
}

#[derive(Clone, Default)]
struct FlakyTransport {
    attempts: Arc<AtomicUsize>,
    sent: Arc<Mutex<Vec<Envelope>>>,
}

#[async_trait]
impl MailTransport for FlakyTransport {
    /// Rejects the first session at authentication, accepts afterwards.
    async fn submit(&self, envelope: &Envelope) -> poetic_mail::Result<()> {
        if self.attempts.fetch_add(1, Ordering::SeqCst) == 0 {
            return Err(ComposerError::delivery(
                "permanent error (535): authentication failed",
            ));
        }
        self.sent.lock().unwrap().push(envelope.clone());
        Ok(())
    }
}

#[derive(Clone, Default)]
struct CountingGenerator {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl Generator for CountingGenerator {
    async fn generate(&self, _prompt: &str) -> poetic_mail::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(POETIC_BODY.to_string())
    }
}

fn http_generator(server: &MockServer) -> OpenAiGenerator {
    OpenAiGenerator::new(
        server.url("/v1"),
        "sk-test",
        "gpt-3.5-turbo",
        0.7,
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn test_end_to_end_send_with_chat_completion_api() -> Result<()> {
    let server = MockServer::start_async().await;

    let api_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .header("authorization", "Bearer sk-test")
                .body_contains("Subject: Meeting")
                .body_contains("Content: Let's meet Tuesday.");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "choices": [{"index": 0, "message": {"role": "assistant", "content": POETIC_BODY}}]
                }));
        })
        .await;

    let transport = RecordingTransport::default();
    let composer = Composer::new(
        Transformer::new(http_generator(&server)),
        Dispatcher::new(transport.clone(), "poet@gmail.com"),
    );

    let draft = Draft::new("bob@bhavyabgada.dev", "Meeting", "Let's meet Tuesday.");
    let mut cache: Option<ComposedMessage> = None;
    composer.send(&draft, &mut cache).await?;

    api_mock.assert_async().await;
    assert!(cache.is_none());
    assert_eq!(
        transport.sent(),
        vec![Envelope {
            from: "poet@gmail.com".to_string(),
            to: "bob@bhavyabgada.dev".to_string(),
            subject: "Meeting".to_string(),
            body: POETIC_BODY.to_string(),
        }]
    );
    Ok(())
}

#[tokio::test]
async fn test_disallowed_recipient_makes_no_network_calls() -> Result<()> {
    let server = MockServer::start_async().await;

    let api_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200).json_body(serde_json::json!({
                "choices": [{"message": {"content": POETIC_BODY}}]
            }));
        })
        .await;

    let transport = RecordingTransport::default();
    let composer = Composer::new(
        Transformer::new(http_generator(&server)),
        Dispatcher::new(transport.clone(), "poet@gmail.com"),
    );

    let draft = Draft::new("bob@gmail.com", "Meeting", "Let's meet Tuesday.");
    let mut cache = None;
    let result = composer.send(&draft, &mut cache).await;

    assert!(matches!(result, Err(ComposerError::ValidationError { .. })));
    assert_eq!(api_mock.hits_async().await, 0);
    assert!(transport.sent().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_preview_then_send_reuses_preview() -> Result<()> {
    let generator = CountingGenerator::default();
    let transport = RecordingTransport::default();
    let composer = Composer::new(
        Transformer::new(generator.clone()),
        Dispatcher::new(transport.clone(), "poet@gmail.com"),
    );

    let draft = Draft::new("bob@bhavyabgada.dev", "Meeting", "Let's meet Tuesday.");
    let mut cache = Some(composer.preview(&draft).await?);
    composer.send(&draft, &mut cache).await?;

    assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    assert!(cache.is_none());
    assert_eq!(transport.sent()[0].body, POETIC_BODY);
    Ok(())
}

#[tokio::test]
async fn test_retry_after_delivery_failure_does_not_regenerate() -> Result<()> {
    let generator = CountingGenerator::default();
    let transport = FlakyTransport::default();
    let composer = Composer::new(
        Transformer::new(generator.clone()),
        Dispatcher::new(transport.clone(), "poet@gmail.com"),
    );

    let draft = Draft::new("bob@bhavyabgada.dev", "Meeting", "Let's meet Tuesday.");
    let mut cache = None;

    let first = composer.send(&draft, &mut cache).await;
    match first {
        Err(ComposerError::DeliveryError { message }) => {
            assert!(message.contains("authentication failed"))
        }
        other => panic!("expected delivery error, got {:?}", other),
    }
    assert!(cache.is_some());

    composer.send(&draft, &mut cache).await?;

    assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    assert_eq!(transport.attempts.load(Ordering::SeqCst), 2);
    assert!(cache.is_none());
    assert_eq!(transport.sent.lock().unwrap()[0].body, POETIC_BODY);
    Ok(())
}

#[tokio::test]
async fn test_generation_failure_aborts_send() -> Result<()> {
    let server = MockServer::start_async().await;

    let api_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(401).json_body(serde_json::json!({
                "error": {"message": "Incorrect API key provided"}
            }));
        })
        .await;

    let transport = RecordingTransport::default();
    let composer = Composer::new(
        Transformer::new(http_generator(&server)),
        Dispatcher::new(transport.clone(), "poet@gmail.com"),
    );

    let draft = Draft::new("bob@bhavyabgada.dev", "Meeting", "Let's meet Tuesday.");
    let mut cache = None;
    let result = composer.send(&draft, &mut cache).await;

    api_mock.assert_async().await;
    assert!(matches!(result, Err(ComposerError::GenerationError { .. })));
    assert!(cache.is_none());
    assert!(transport.sent().is_empty());
    Ok(())
}
