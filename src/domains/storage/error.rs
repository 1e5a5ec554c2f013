//! Storage-specific error types.

use thiserror::Error;

/// Errors that can occur during snippet storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No blob exists under the requested key.
    #[error("Snippet not found: {0}")]
    NotFound(String),

    /// The key is empty or would escape the storage root.
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// I/O failure talking to the backing store.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// Create a new "not found" error.
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound(key.into())
    }

    /// Create a new "invalid key" error.
    pub fn invalid_key(msg: impl Into<String>) -> Self {
        Self::InvalidKey(msg.into())
    }

    /// Whether this error is a missing-blob condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
