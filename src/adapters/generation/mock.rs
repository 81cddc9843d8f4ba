//! Scripted generation client for tests.
//!
//! Stands in for the real Gemini adapter: tests queue up replies (plain,
//! grounded, or erroring), optionally add latency, and afterwards inspect
//! exactly which requests the code under test sent.
//!
//! ```ignore
//! let client = MockGenerationClient::new()
//!     .with_reply("```json\n{\"marketSummary\":\"...\"}\n```");
//!
//! let reply = client.generate(request).await?;
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    GenerationClient, GenerationError, GenerationReply, GenerationRequest, GroundingLink,
};

/// Generation client whose behavior is scripted up front.
///
/// Clones share the reply queue and call log, so a handler under test and
/// the assertions after it see the same state.
#[derive(Debug, Clone, Default)]
pub struct MockGenerationClient {
    /// Queued replies, served front to back.
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    /// Artificial latency added to every call.
    delay: Duration,
    /// Every request this client has received.
    calls: Arc<Mutex<Vec<GenerationRequest>>>,
}

/// One scripted outcome.
#[derive(Debug, Clone)]
pub enum MockReply {
    Success(GenerationReply),
    Error(MockError),
}

/// Failure modes a test can script, mirroring [`GenerationError`].
#[derive(Debug, Clone)]
pub enum MockError {
    RateLimited { retry_after_secs: u64 },
    InvalidRequest { message: String },
    Unavailable { message: String },
    AuthenticationFailed,
    Network { message: String },
    Parse { message: String },
    Timeout { timeout_secs: u64 },
}

impl From<MockError> for GenerationError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => {
                GenerationError::rate_limited(retry_after_secs)
            }
            MockError::InvalidRequest { message } => GenerationError::invalid_request(message),
            MockError::Unavailable { message } => GenerationError::unavailable(message),
            MockError::AuthenticationFailed => GenerationError::AuthenticationFailed,
            MockError::Network { message } => GenerationError::network(message),
            MockError::Parse { message } => GenerationError::parse(message),
            MockError::Timeout { timeout_secs } => GenerationError::Timeout { timeout_secs },
        }
    }
}

impl MockGenerationClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a plain text reply.
    pub fn with_reply(self, text: impl Into<String>) -> Self {
        self.push_reply(MockReply::Success(GenerationReply::new(text)))
    }

    /// Queues a reply that carries grounding links.
    pub fn with_grounded_reply(
        self,
        text: impl Into<String>,
        links: Vec<GroundingLink>,
    ) -> Self {
        self.push_reply(MockReply::Success(
            GenerationReply::new(text).with_grounding_links(links),
        ))
    }

    /// Queues a failure.
    pub fn with_error(self, error: MockError) -> Self {
        self.push_reply(MockReply::Error(error))
    }

    /// Adds artificial latency to every call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// How many times `generate` has been called.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Copy of every request received so far, oldest first.
    pub fn get_calls(&self) -> Vec<GenerationRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Forgets the recorded requests.
    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn push_reply(self, reply: MockReply) -> Self {
        let mut replies = self.replies.lock().unwrap();
        replies.push_back(reply);
        drop(replies);
        self
    }

    /// Next scripted outcome; a canned success once the queue runs dry.
    fn next_reply(&self) -> MockReply {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockReply::Success(GenerationReply::new("Mock reply")))
    }
}

#[async_trait]
impl GenerationClient for MockGenerationClient {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationReply, GenerationError> {
        self.calls.lock().unwrap().push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_reply() {
            MockReply::Success(reply) => Ok(reply),
            MockReply::Error(err) => Err(err.into()),
        }
    }
}
