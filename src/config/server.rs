//! HTTP server configuration

use serde::Deserialize;
use std::net::SocketAddr;

use super::error::ValidationError;

/// Deployment environment the server reports itself as.
///
/// Production switches log output to JSON lines; everything else stays
/// human-readable.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

/// Network and runtime settings for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface the listener binds to.
    #[serde(default = "default_bind_host")]
    pub host: String,

    /// TCP port the listener binds to.
    #[serde(default = "default_bind_port")]
    pub port: u16,

    /// Deployment environment.
    #[serde(default)]
    pub environment: Environment,

    /// Fallback log filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_level: String,

    /// Comma-separated CORS origins; unset means every origin is allowed.
    #[serde(default)]
    pub cors_origins: Option<String>,
}

impl ServerConfig {
    /// Address the listener binds to.
    pub fn socket_addr(&self) -> SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid bind address")
    }

    /// True when deployed as production.
    pub fn is_production(&self) -> bool {
        matches!(self.environment, Environment::Production)
    }

    /// Splits the configured CORS origins into individual values.
    pub fn cors_origins_list(&self) -> Vec<String> {
        match &self.cors_origins {
            Some(origins) => origins.split(',').map(|s| s.trim().to_string()).collect(),
            None => Vec::new(),
        }
    }

    /// Semantic checks beyond what deserialization enforces.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_bind_host(),
            port: default_bind_port(),
            environment: Environment::default(),
            log_level: default_log_filter(),
            cors_origins: None,
        }
    }
}

fn default_bind_host() -> String {
    "0.0.0.0".to_string()
}

fn default_bind_port() -> u16 {
    8080
}

fn default_log_filter() -> String {
    "info,trade_compass=debug".to_string()
}
