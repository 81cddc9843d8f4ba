//! Typed application configuration
//!
//! Settings come from the process environment (with a `.env` file layered in
//! during development via `dotenvy`) and deserialize into plain structs through
//! the `config` crate. Every variable carries the `TRADE_COMPASS` prefix, and
//! `__` descends into nested sections.
//!
//! ```no_run
//! use trade_compass::config::AppConfig;
//!
//! let config = AppConfig::load().expect("config load failed");
//! config.validate().expect("config rejected");
//! println!("listening on {}", config.server.socket_addr());
//! ```

mod ai;
mod error;
mod server;
mod storage;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use storage::StorageConfig;

use serde::Deserialize;

/// Top-level configuration for the Trade Compass backend.
///
/// Each section is optional in the environment; missing sections fall back to
/// their defaults, so a bare `TRADE_COMPASS__AI__GEMINI_API_KEY` is enough to
/// boot a development instance.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Listener address, environment and logging.
    #[serde(default)]
    pub server: ServerConfig,

    /// Gemini credentials and request tuning.
    #[serde(default)]
    pub ai: AiConfig,

    /// Where the report cart is persisted.
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Reads configuration from the environment.
    ///
    /// `TRADE_COMPASS__SERVER__PORT=8080` lands in `server.port`;
    /// `TRADE_COMPASS__AI__GEMINI_API_KEY=...` in `ai.gemini_api_key`, and so
    /// on through the nested sections.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::LoadError`] when a variable cannot be parsed
    /// into its typed field.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let source = config::Environment::default()
            .prefix("TRADE_COMPASS")
            .separator("__");

        let config = config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Runs the semantic checks each section defines for itself.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered: a missing API key,
    /// an out-of-range port or timeout, or an empty data directory.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.storage.validate()?;
        Ok(())
    }

    /// True when the server section says production.
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
