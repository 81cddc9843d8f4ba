//! Gemini client configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Credentials and request tuning for the Gemini generation client.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// API key; required to boot, never logged.
    pub gemini_api_key: Option<String>,

    /// Model requested for every generation call.
    #[serde(default = "default_model_name")]
    pub model: String,

    /// Upper bound on a single generation round-trip, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries attempted after transient upstream failures.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl AiConfig {
    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// True when a non-empty API key is present.
    pub fn has_api_key(&self) -> bool {
        self.gemini_api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Rejects configurations the Gemini adapter cannot run with.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_api_key() {
            return Err(ValidationError::MissingRequired("GEMINI_API_KEY"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            model: default_model_name(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

fn default_model_name() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_max_retries() -> u32 {
    3
}
