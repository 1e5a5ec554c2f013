//! Snippet store abstraction - the key-value blob collaborator.
//!
//! Snippets live one blob per snippet under `snippets/{name}.json`; the
//! stored content is the raw snippet text. The store trait is the narrow
//! seam the tools depend on; production uses the filesystem-backed
//! implementation, tests use the in-memory one.

use async_trait::async_trait;

use super::error::StorageError;

/// Prefix under which all snippet blobs are stored.
pub const SNIPPET_PREFIX: &str = "snippets/";

/// Build the storage key for a snippet name: `snippets/{name}.json`.
pub fn snippet_key(name: &str) -> String {
    format!("{}{}.json", SNIPPET_PREFIX, name)
}

/// Recover the snippet name from a storage key, if it is one.
pub fn snippet_name(key: &str) -> Option<&str> {
    key.strip_prefix(SNIPPET_PREFIX)?.strip_suffix(".json")
}

/// Key-value blob store for snippet content.
#[async_trait]
pub trait SnippetStore: Send + Sync {
    /// Read the content stored under `key`.
    ///
    /// Fails with [`StorageError::NotFound`] when no blob exists.
    async fn read(&self, key: &str) -> Result<String, StorageError>;

    /// Write `content` under `key`, replacing any existing blob.
    async fn write(&self, key: &str, content: &str) -> Result<(), StorageError>;

    /// Check whether a blob exists under `key`.
    async fn exists(&self, key: &str) -> Result<bool, StorageError>;

    /// List all keys under the given prefix.
    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError>;
}

/// Validate a storage key: non-empty, relative, no traversal segments.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    if key.is_empty() {
        return Err(StorageError::invalid_key("key must not be empty"));
    }
    if key.starts_with('/') || key.contains('\\') {
        return Err(StorageError::invalid_key(format!(
            "key must be a relative forward-slash path: {}",
            key
        )));
    }
    if key.split('/').any(|segment| segment == ".." || segment.is_empty()) {
        return Err(StorageError::invalid_key(format!(
            "key must not contain empty or '..' segments: {}",
            key
        )));
    }
    Ok(())
}
