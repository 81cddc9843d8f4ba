//! File store configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Location settings for the on-disk key-value store.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory the report cart file lives in.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl StorageConfig {
    /// The data directory as a [`PathBuf`].
    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    /// Rejects a blank data directory.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.data_dir.trim().is_empty() {
            return Err(ValidationError::EmptyDataDir);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> String {
    "data".to_string()
}
