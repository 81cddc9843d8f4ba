//! Generation port.
//!
//! Abstracts the text-generation service the research flows talk to, so
//! nothing outside the adapter couples to a specific provider API. Calls
//! are single-shot prompt-in, reply-out with no conversation state; a
//! request may carry inline image attachments and a web-search toggle,
//! and a reply carries text plus whatever grounding links the search
//! produced. Replies are transient: nothing from one is persisted as-is.
//! Retry policy lives in the transport, not here.
//! - Transport owns retries; see each implementation

use async_trait::async_trait;

/// Port for generative AI provider interactions.
///
/// Implementations connect to an external generation service and
/// translate between its wire format and these types.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Sends one prompt and returns the model's reply.
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationReply, GenerationError>;
}

/// A single generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// The full prompt text.
    pub prompt: String,
    /// Inline images sent ahead of the prompt text.
    pub attachments: Vec<ImageAttachment>,
    /// Whether the provider should ground the reply in web search.
    pub web_search: bool,
}

impl GenerationRequest {
    /// Creates a request with no attachments and web search off.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            attachments: Vec::new(),
            web_search: false,
        }
    }

    /// Adds one image attachment.
    pub fn with_attachment(mut self, attachment: ImageAttachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Replaces the attachment list.
    pub fn with_attachments(mut self, attachments: Vec<ImageAttachment>) -> Self {
        self.attachments = attachments;
        self
    }

    /// Turns web-search grounding on or off.
    pub fn with_web_search(mut self, enabled: bool) -> Self {
        self.web_search = enabled;
        self
    }
}

/// Raw image bytes sent inline with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub bytes: Vec<u8>,
    /// MIME type the provider is told ("image/png").
    pub mime_type: String,
}

impl ImageAttachment {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }
}

/// The model's reply to one request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationReply {
    /// Concatenated reply text.
    pub text: String,
    /// Web sources the provider grounded the reply in, in the order
    /// the provider listed them. Empty when web search was off or
    /// nothing was consulted.
    pub grounding_links: Vec<GroundingLink>,
}

impl GenerationReply {
    /// Creates a text-only reply.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            grounding_links: Vec::new(),
        }
    }

    /// Sets the grounding links.
    pub fn with_grounding_links(mut self, links: Vec<GroundingLink>) -> Self {
        self.grounding_links = links;
        self
    }
}

/// One web source consulted while grounding a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroundingLink {
    pub title: String,
    pub uri: String,
}

impl GroundingLink {
    pub fn new(title: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            uri: uri.into(),
        }
    }
}

/// What can go wrong while talking to a generation provider.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// The provider throttled us.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// How long the provider asked us to wait.
        retry_after_secs: u64,
    },

    /// Credentials were rejected.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The provider rejected the request as malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The service is temporarily down.
    #[error("provider unavailable: {message}")]
    Unavailable { message: String },

    /// Transport failure before any response arrived.
    #[error("network error: {0}")]
    Network(String),

    /// The response arrived but made no sense.
    #[error("parse error: {0}")]
    Parse(String),

    /// No response within the configured deadline.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// The deadline that elapsed.
        timeout_secs: u64,
    },
}

impl GenerationError {
    pub fn rate_limited(retry_after_secs: u64) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Whether a retry could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GenerationError::RateLimited { .. }
                | GenerationError::Unavailable { .. }
                | GenerationError::Network(_)
                | GenerationError::Timeout { .. }
        )
    }
}
