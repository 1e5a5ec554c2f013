//! Directory and credential collaborators.
//!
//! The greeting tool depends on two narrow seams: a [`TokenProvider`] that
//! yields a credential scoped to the directory audience, and a
//! [`DirectoryClient`] that resolves the calling user's profile. Production
//! wires an HTTP client against a Graph-style endpoint; tests substitute
//! doubles.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::error::IdentityError;

/// Default scope requested from the credential provider.
pub const DIRECTORY_DEFAULT_SCOPE: &str = "https://graph.microsoft.com/.default";

/// Default base URL of the directory API.
pub const DEFAULT_DIRECTORY_BASE_URL: &str = "https://graph.microsoft.com/v1.0";

// ============================================================================
// Credentials
// ============================================================================

/// An opaque bearer token.
#[derive(Clone)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// The raw token value, for the Authorization header.
    pub fn secret(&self) -> &str {
        &self.0
    }
}

/// Redact the token value from logs.
impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
    }
}

/// Credential provider scoped to a fixed audience.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Obtain a token valid for the given scopes.
    async fn get_token(&self, scopes: &[String]) -> Result<AccessToken, IdentityError>;
}

/// Token provider returning a pre-acquired credential from configuration.
///
/// The hosting platform performs the actual token exchange and hands the
/// result to the process via environment; this provider just surfaces it.
#[derive(Debug, Default)]
pub struct StaticTokenProvider {
    token: Option<AccessToken>,
}

impl StaticTokenProvider {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.map(AccessToken::new),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn get_token(&self, scopes: &[String]) -> Result<AccessToken, IdentityError> {
        self.token.clone().ok_or_else(|| {
            IdentityError::token(format!(
                "no credential configured for scopes [{}]",
                scopes.join(", ")
            ))
        })
    }
}

// ============================================================================
// Directory Client
// ============================================================================

/// The calling user's profile as returned by the directory.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    /// Human-readable display name.
    #[serde(rename = "displayName")]
    pub display_name: String,

    /// Principal name (usually the sign-in address).
    #[serde(rename = "userPrincipalName")]
    pub principal_name: String,
}

/// Directory API client resolving the current caller's profile.
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// Fetch the profile of the authenticated caller.
    async fn current_user(&self) -> Result<UserProfile, IdentityError>;
}

/// Directory client over HTTP against a Graph-style `/me` endpoint.
pub struct HttpDirectoryClient {
    http: reqwest::Client,
    base_url: String,
    token_provider: Arc<dyn TokenProvider>,
    scopes: Vec<String>,
}

impl HttpDirectoryClient {
    pub fn new(base_url: impl Into<String>, token_provider: Arc<dyn TokenProvider>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token_provider,
            scopes: vec![DIRECTORY_DEFAULT_SCOPE.to_string()],
        }
    }
}

#[async_trait]
impl DirectoryClient for HttpDirectoryClient {
    async fn current_user(&self) -> Result<UserProfile, IdentityError> {
        let token = self.token_provider.get_token(&self.scopes).await?;

        let url = format!("{}/me", self.base_url);
        debug!("Fetching caller profile from {}", url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(token.secret())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IdentityError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<UserProfile>()
            .await
            .map_err(|e| IdentityError::decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_provider_without_token_fails() {
        let provider = StaticTokenProvider::new(None);
        let err = provider
            .get_token(&[DIRECTORY_DEFAULT_SCOPE.to_string()])
            .await
            .unwrap_err();
        assert_eq!(err.kind_name(), "TokenAcquisitionError");
        assert!(err.to_string().contains(DIRECTORY_DEFAULT_SCOPE));
    }

    #[tokio::test]
    async fn test_static_provider_returns_token() {
        let provider = StaticTokenProvider::new(Some("secret-token".to_string()));
        let token = provider.get_token(&[]).await.unwrap();
        assert_eq!(token.secret(), "secret-token");
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let token = AccessToken::new("super-secret");
        let debug = format!("{:?}", token);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_profile_decodes_directory_field_names() {
        let profile: UserProfile = serde_json::from_str(
            r#"{ "displayName": "Ada Lovelace", "userPrincipalName": "ada@example.com" }"#,
        )
        .unwrap();
        assert_eq!(profile.display_name, "Ada Lovelace");
        assert_eq!(profile.principal_name, "ada@example.com");
    }
}
