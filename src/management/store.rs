use std::{io::ErrorKind, path::PathBuf};

use thiserror::Error;

use crate::config;

pub const KEY_CODE_VERIFIER: &str = "spotify_code_verifier";
pub const KEY_ACCESS_TOKEN: &str = "spotify_access_token";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("local store I/O failed: {0}")]
    IoError(#[from] std::io::Error),
    #[error("local store holds a corrupt value: {0}")]
    SerdeError(#[from] serde_json::Error),
}

/// Single-user key/value store, one file per key.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store below the application's local data directory.
    pub fn default_location() -> Self {
        Self::new(config::data_dir().join("store"))
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match async_fs::read_to_string(self.path(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::IoError(e)),
        }
    }

    pub async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        async_fs::create_dir_all(&self.root).await?;
        async_fs::write(self.path(key), value).await?;
        Ok(())
    }

    /// Removes a key. Removing a missing key is not an error.
    pub async fn remove(&self, key: &str) -> Result<(), StoreError> {
        match async_fs::remove_file(self.path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::IoError(e)),
        }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}
