//! Key-Value Storage Port - Interface for persisting small documents.
//!
//! This port defines how serialized state blobs are saved and loaded
//! by key, supporting both file-based and in-memory storage. The
//! report store persists its whole cart through it as one value.

use async_trait::async_trait;

/// Errors that can occur during key-value storage operations
#[derive(Debug, thiserror::Error)]
pub enum KeyValueError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl KeyValueError {
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(message.into())
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }
}

/// Port for persisting and loading values by key
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Load the value stored under `key`
    ///
    /// # Returns
    /// `None` if nothing was ever stored under the key
    ///
    /// # Errors
    /// Returns `KeyValueError` if the read fails
    async fn get(&self, key: &str) -> Result<Option<String>, KeyValueError>;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    /// Returns `KeyValueError` if the write fails
    async fn put(&self, key: &str, value: &str) -> Result<(), KeyValueError>;

    /// Remove the value stored under `key`
    ///
    /// Removing an absent key is not an error.
    ///
    /// # Errors
    /// Returns `KeyValueError` if the removal fails
    async fn remove(&self, key: &str) -> Result<(), KeyValueError>;
}
