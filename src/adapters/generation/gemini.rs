//! Gemini transport for the generation port.
//!
//! Speaks to the `generateContent` endpoint: attaches inline image data and
//! the Google Search grounding tool when asked, retries transient failures
//! with doubling backoff, and maps the wire shapes back onto the port types.
//!
//! ```ignore
//! let config = GeminiConfig::new(api_key)
//!     .with_model("gemini-2.5-flash")
//!     .with_base_url("https://generativelanguage.googleapis.com");
//!
//! let client = GeminiClient::new(config);
//! ```
//!
//! # Grounding
//!
//! When a request enables web search the `google_search` tool is attached and
//! the sources Gemini consulted come back as `groundingMetadata` chunks. Those
//! are surfaced as [`GroundingLink`]s on the reply; chunks without a web
//! source are dropped.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    GenerationClient, GenerationError, GenerationReply, GenerationRequest, GroundingLink,
};

/// Connection settings for [`GeminiClient`].
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Never printed; `Secret` keeps it out of Debug output.
    api_key: Secret<String>,
    /// Model named in the endpoint path.
    pub model: String,
    /// Scheme and host, without a trailing slash.
    pub base_url: String,
    /// Deadline for one HTTP round-trip.
    pub timeout: Duration,
    /// Retries allowed on top of the first attempt.
    pub max_retries: u32,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout: Duration::from_secs(120),
            max_retries: 3,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Unwraps the key for the request header.
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// HTTP client for the Gemini `generateContent` API.
pub struct GeminiClient {
    config: GeminiConfig,
    client: Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Builds the generateContent endpoint URL.
    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    /// Converts our request to Gemini's format.
    ///
    /// Image parts come before the text part, matching the order the prompts
    /// reference them in.
    fn to_gemini_request(&self, request: &GenerationRequest) -> GeminiRequest {
        let mut parts = Vec::with_capacity(request.attachments.len() + 1);

        for attachment in &request.attachments {
            parts.push(GeminiPart::InlineData {
                inline_data: GeminiInlineData {
                    mime_type: attachment.mime_type.clone(),
                    data: BASE64.encode(&attachment.bytes),
                },
            });
        }
        parts.push(GeminiPart::Text {
            text: request.prompt.clone(),
        });

        let tools = request.web_search.then(|| {
            vec![GeminiTool {
                google_search: GoogleSearch {},
            }]
        });

        GeminiRequest {
            contents: vec![GeminiContent { parts }],
            tools,
        }
    }

    /// Sends a request and maps transport failures.
    async fn send_request(&self, request: &GenerationRequest) -> Result<Response, GenerationError> {
        let gemini_request = self.to_gemini_request(request);

        self.client
            .post(self.generate_url())
            .header("x-goog-api-key", self.config.api_key())
            .header("Content-Type", "application/json")
            .json(&gemini_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else if e.is_connect() {
                    GenerationError::network(format!("Connection failed: {}", e))
                } else {
                    GenerationError::network(e.to_string())
                }
            })
    }

    /// Maps non-success statuses onto the port error taxonomy.
    async fn handle_response_status(
        &self,
        response: Response,
    ) -> Result<Response, GenerationError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 | 403 => Err(GenerationError::AuthenticationFailed),
            429 => {
                let retry_after = Self::parse_retry_delay(&error_body);
                Err(GenerationError::rate_limited(retry_after))
            }
            400 => Err(GenerationError::InvalidRequest(error_body)),
            500..=599 => Err(GenerationError::unavailable(format!(
                "server error {}: {}",
                status, error_body
            ))),
            _ => Err(GenerationError::network(format!(
                "unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    /// Parses the RetryInfo delay from a 429 error body.
    fn parse_retry_delay(error_body: &str) -> u64 {
        // Gemini reports the delay as a "30s" style duration in error details
        if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(error_body) {
            if let Some(details) = parsed
                .get("error")
                .and_then(|e| e.get("details"))
                .and_then(|d| d.as_array())
            {
                for detail in details {
                    if let Some(delay) = detail.get("retryDelay").and_then(|d| d.as_str()) {
                        if let Ok(secs) = delay.trim_end_matches('s').parse::<u64>() {
                            return secs;
                        }
                    }
                }
            }
        }
        30 // Default when the body carries no RetryInfo
    }

    /// Parses a successful response body.
    async fn parse_response(&self, response: Response) -> Result<GenerationReply, GenerationError> {
        let response = self.handle_response_status(response).await?;

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::parse(format!("Failed to parse response: {}", e)))?;

        to_reply(gemini_response)
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationReply, GenerationError> {
        let mut attempt = 0;

        loop {
            let outcome = match self.send_request(&request).await {
                Ok(response) => self.parse_response(response).await,
                Err(err) => Err(err),
            };

            match outcome {
                Ok(reply) => return Ok(reply),
                Err(err) if err.is_retryable() && attempt < self.config.max_retries => {
                    // Backoff doubles per attempt: 1s, 2s, 4s, ...
                    sleep(Duration::from_secs(1 << attempt)).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

/// Maps a parsed Gemini body onto the port reply type.
///
/// The first candidate's text parts are concatenated in order. A reply with
/// no candidates at all (filtered or blocked prompts) is a parse failure.
fn to_reply(response: GeminiResponse) -> Result<GenerationReply, GenerationError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| GenerationError::parse("Reply contained no candidates"))?;

    let text = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    let grounding_links = candidate
        .grounding_metadata
        .map(|metadata| {
            metadata
                .grounding_chunks
                .into_iter()
                .filter_map(|chunk| chunk.web)
                .filter_map(|web| {
                    let uri = web.uri?;
                    let title = web.title.filter(|t| !t.is_empty()).unwrap_or_else(|| uri.clone());
                    Some(GroundingLink::new(title, uri))
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(GenerationReply::new(text).with_grounding_links(grounding_links))
}

// ----- Gemini API Types -----

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<GeminiTool>>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum GeminiPart {
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: GeminiInlineData,
    },
    Text {
        text: String,
    },
}

#[derive(Debug, Serialize)]
struct GeminiInlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GeminiTool {
    #[serde(rename = "googleSearch")]
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiReplyContent>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct GeminiReplyContent {
    #[serde(default)]
    parts: Vec<GeminiReplyPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiReplyPart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    web: Option<WebSource>,
}

#[derive(Debug, Deserialize)]
struct WebSource {
    uri: Option<String>,
    title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::ImageAttachment;

    #[test]
    fn config_builder_works() {
        let config = GeminiConfig::new("test-key")
            .with_model("gemini-2.0-flash")
            .with_base_url("https://custom.api.com")
            .with_timeout(Duration::from_secs(30))
            .with_max_retries(5);

        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.base_url, "https://custom.api.com");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn generate_url_includes_model() {
        let client = GeminiClient::new(GeminiConfig::new("test"));

        assert_eq!(
            client.generate_url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn request_puts_images_before_text() {
        let client = GeminiClient::new(GeminiConfig::new("test"));
        let request = GenerationRequest::new("Describe the product")
            .with_attachment(ImageAttachment::new(vec![1, 2, 3], "image/png"));

        let body = serde_json::to_value(client.to_gemini_request(&request)).unwrap();
        let parts = body["contents"][0]["parts"].as_array().unwrap();

        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[0]["inlineData"]["data"], BASE64.encode([1, 2, 3]));
        assert_eq!(parts[1]["text"], "Describe the product");
    }

    #[test]
    fn request_attaches_search_tool_when_enabled() {
        let client = GeminiClient::new(GeminiConfig::new("test"));
        let request = GenerationRequest::new("prompt").with_web_search(true);

        let body = serde_json::to_value(client.to_gemini_request(&request)).unwrap();

        assert_eq!(body["tools"][0]["googleSearch"], serde_json::json!({}));
    }

    #[test]
    fn request_omits_tools_without_web_search() {
        let client = GeminiClient::new(GeminiConfig::new("test"));
        let request = GenerationRequest::new("prompt");

        let body = serde_json::to_value(client.to_gemini_request(&request)).unwrap();

        assert!(body.get("tools").is_none());
    }

    #[test]
    fn reply_concatenates_text_parts() {
        let response: GeminiResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"Hello"},{"text":" world"}]}}]}"#,
        )
        .unwrap();

        let reply = to_reply(response).unwrap();
        assert_eq!(reply.text, "Hello world");
        assert!(reply.grounding_links.is_empty());
    }

    #[test]
    fn reply_collects_grounding_links() {
        let response: GeminiResponse = serde_json::from_str(
            r#"{
                "candidates": [{
                    "content": {"parts": [{"text": "ok"}]},
                    "groundingMetadata": {
                        "groundingChunks": [
                            {"web": {"uri": "https://example.com/a", "title": "Example A"}},
                            {"web": {"uri": "https://example.com/b"}},
                            {"retrievedContext": {"uri": "ignored"}}
                        ]
                    }
                }]
            }"#,
        )
        .unwrap();

        let reply = to_reply(response).unwrap();
        assert_eq!(reply.grounding_links.len(), 2);
        assert_eq!(reply.grounding_links[0].title, "Example A");
        assert_eq!(reply.grounding_links[0].uri, "https://example.com/a");
        // Untitled sources fall back to their URI
        assert_eq!(reply.grounding_links[1].title, "https://example.com/b");
    }

    #[test]
    fn reply_without_candidates_is_a_parse_error() {
        let response: GeminiResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();

        let result = to_reply(response);
        assert!(matches!(result, Err(GenerationError::Parse(_))));
    }

    #[test]
    fn reply_without_content_yields_empty_text() {
        let response: GeminiResponse =
            serde_json::from_str(r#"{"candidates":[{}]}"#).unwrap();

        let reply = to_reply(response).unwrap();
        assert!(reply.text.is_empty());
    }

    #[test]
    fn parse_retry_delay_reads_retry_info() {
        let error = r#"{
            "error": {
                "code": 429,
                "details": [
                    {"@type": "type.googleapis.com/google.rpc.RetryInfo", "retryDelay": "12s"}
                ]
            }
        }"#;

        assert_eq!(GeminiClient::parse_retry_delay(error), 12);
    }

    #[test]
    fn parse_retry_delay_default() {
        let error = r#"{"error":{"message":"Resource has been exhausted"}}"#;
        assert_eq!(GeminiClient::parse_retry_delay(error), 30);
    }
}
