//! Configuration failure modes

use thiserror::Error;

/// Raised while reading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read configuration from environment: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("configuration rejected: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Raised by the per-section semantic checks.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("required setting {0} is missing")]
    MissingRequired(&'static str),

    #[error("server port must be non-zero")]
    InvalidPort,

    #[error("generation timeout must be non-zero")]
    InvalidTimeout,

    #[error("storage data directory must not be empty")]
    EmptyDataDir,
}
