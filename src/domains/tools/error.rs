//! Tool-specific error types.

use thiserror::Error;

use super::binder::BindingError;
use super::schema::SchemaError;
use crate::domains::storage::StorageError;

/// Errors that can occur during tool dispatch and execution.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found in the registry.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// Binding the raw arguments against the tool's schema failed.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(#[from] BindingError),

    /// A collaborator call failed during execution.
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    /// The requested resource does not exist (snippet reads).
    #[error("Not found: {0}")]
    ResourceNotFound(String),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "execution failed" error.
    pub fn execution_failed(msg: impl Into<String>) -> Self {
        Self::ExecutionFailed(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<SchemaError> for ToolError {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::UnknownTool(name) => Self::NotFound(name),
            SchemaError::DuplicateToolName(_) => Self::Internal(err.to_string()),
        }
    }
}

impl From<StorageError> for ToolError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(key) => Self::ResourceNotFound(key),
            other => Self::ExecutionFailed(other.to_string()),
        }
    }
}
