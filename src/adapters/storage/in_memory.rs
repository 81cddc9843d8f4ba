//! In-Memory Key-Value Storage Adapter
//!
//! Stores values in a shared map. Useful for testing and development;
//! clones share the same underlying map. Failure injection lets tests
//! exercise the degraded paths of storage consumers.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{KeyValueError, KeyValueStore};

/// Map-backed store; clones share the map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
    fail_reads: bool,
    fail_writes: bool,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `get` after this fails with an I/O error.
    pub fn with_failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    /// Every `put` and `remove` after this fails with an I/O error.
    pub fn with_failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Number of keys currently held.
    pub async fn entry_count(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, KeyValueError> {
        if self.fail_reads {
            return Err(KeyValueError::io("injected read failure"));
        }
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), KeyValueError> {
        if self.fail_writes {
            return Err(KeyValueError::io("injected write failure"));
        }
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), KeyValueError> {
        if self.fail_writes {
            return Err(KeyValueError::io("injected write failure"));
        }
        let mut entries = self.entries.write().await;
        entries.remove(key);
        Ok(())
    }
}
