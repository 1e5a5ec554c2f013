//! Filesystem-backed snippet store.
//!
//! One file per blob under a configured root directory. Keys are
//! validated before touching the filesystem so a malicious snippet name
//! cannot escape the root.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::error::StorageError;
use super::store::{SnippetStore, validate_key};

/// Snippet store writing one file per key under a root directory.
#[derive(Debug, Clone)]
pub struct FsSnippetStore {
    root: PathBuf,
}

impl FsSnippetStore {
    /// Create a store rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory of this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl SnippetStore for FsSnippetStore {
    async fn read(&self, key: &str) -> Result<String, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::not_found(key))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, key: &str, content: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&path, content).await?;
        debug!("Wrote {} bytes to {}", content.len(), key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        let path = self.path_for(key)?;
        Ok(fs::try_exists(&path).await?)
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        validate_key(prefix.trim_end_matches('/'))?;
        let dir = self.root.join(prefix);

        let mut keys = Vec::new();
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            // A prefix nobody has written to yet is just empty.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(keys),
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                keys.push(format!(
                    "{}{}",
                    prefix,
                    entry.file_name().to_string_lossy()
                ));
            }
        }

        keys.sort();
        Ok(keys)
    }
}
