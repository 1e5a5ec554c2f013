//! Identity-specific error types.

use thiserror::Error;

/// Errors that can occur while acquiring credentials or calling the
/// directory API.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// No credential could be obtained for the requested scopes.
    #[error("Token acquisition failed: {0}")]
    TokenAcquisition(String),

    /// The directory request could not be sent or completed.
    #[error("Directory request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The directory rejected the request with a non-success status.
    #[error("Directory returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The directory response could not be decoded into a profile.
    #[error("Failed to decode directory response: {0}")]
    Decode(String),
}

impl IdentityError {
    /// Create a new token acquisition error.
    pub fn token(msg: impl Into<String>) -> Self {
        Self::TokenAcquisition(msg.into())
    }

    /// Create a new decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Short failure kind name, used in structured error payloads.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::TokenAcquisition(_) => "TokenAcquisitionError",
            Self::Request(_) => "DirectoryRequestError",
            Self::Status { .. } => "DirectoryStatusError",
            Self::Decode(_) => "ProfileDecodeError",
        }
    }
}
