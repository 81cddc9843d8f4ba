//! File-based Key-Value Storage Adapter
//!
//! Stores each value as its own JSON document on disk, named after the
//! key. Simple to inspect and wipe, with no external service needed.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::ports::{KeyValueError, KeyValueStore};

/// File-based storage keeping one `{key}.json` file per key.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    base_path: PathBuf,
}

impl FileKeyValueStore {
    /// Points the store at `base_path`; the directory is created lazily on
    /// the first write.
    ///
    /// ```ignore
    /// let storage = FileKeyValueStore::new("./data/storage");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// File that holds this key's value.
    fn entry_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{key}.json"))
    }

    async fn ensure_base_dir(&self) -> Result<(), KeyValueError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| KeyValueError::io(e.to_string()))
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, KeyValueError> {
        let file_path = self.entry_path(key);

        if !file_path.exists() {
            return Ok(None);
        }

        let value = fs::read_to_string(&file_path)
            .await
            .map_err(|e| KeyValueError::io(e.to_string()))?;

        Ok(Some(value))
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), KeyValueError> {
        self.ensure_base_dir().await?;

        let file_path = self.entry_path(key);

        fs::write(&file_path, value)
            .await
            .map_err(|e| KeyValueError::io(e.to_string()))?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), KeyValueError> {
        let file_path = self.entry_path(key);

        if file_path.exists() {
            fs::remove_file(&file_path)
                .await
                .map_err(|e| KeyValueError::io(e.to_string()))?;
        }

        Ok(())
    }
}
