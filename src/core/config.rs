//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables, configuration files, or defaults.
//! Handlers never read the process environment themselves; everything they
//! need is injected from here at startup.

use super::transport::TransportConfig;
use crate::domains::identity::DEFAULT_DIRECTORY_BASE_URL;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Snippet storage configuration.
    pub storage: StorageConfig,

    /// Identity/directory collaborator configuration.
    pub identity: IdentityConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Configuration for snippet storage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory for the filesystem blob store.
    /// When unset, snippets live in an ephemeral in-memory store.
    pub root: Option<PathBuf>,
}

/// Configuration for the identity and directory collaborators.
#[derive(Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Base URL of the directory API.
    pub directory_base_url: String,

    /// Pre-acquired bearer token handed to the process by the host.
    pub access_token: Option<String>,

    /// Deployment hostname, used to build the consent URL in error
    /// payloads.
    pub hostname: Option<String>,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for IdentityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityConfig")
            .field("directory_base_url", &self.directory_base_url)
            .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
            .field("hostname", &self.hostname)
            .finish()
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            directory_base_url: DEFAULT_DIRECTORY_BASE_URL.to_string(),
            access_token: None,
            hostname: None,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "snippet-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            storage: StorageConfig::default(),
            identity: IdentityConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Variables are prefixed with `MCP_`, except `WEBSITE_HOSTNAME`,
    /// which the hosting platform sets.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(root) = std::env::var("MCP_SNIPPET_ROOT") {
            config.storage.root = Some(PathBuf::from(root));
            info!("Snippet storage root set to {:?}", config.storage.root);
        } else {
            warn!(
                "MCP_SNIPPET_ROOT not set - snippets will be kept in memory \
                 and lost on shutdown"
            );
        }

        if let Ok(base_url) = std::env::var("MCP_DIRECTORY_BASE_URL") {
            config.identity.directory_base_url = base_url;
        }

        if let Ok(token) = std::env::var("MCP_DIRECTORY_TOKEN") {
            config.identity.access_token = Some(token);
            info!("Directory access token loaded from environment");
        } else {
            warn!(
                "MCP_DIRECTORY_TOKEN not set - say_hello will report an \
                 unauthenticated error payload"
            );
        }

        if let Ok(hostname) = std::env::var("WEBSITE_HOSTNAME") {
            config.identity.hostname = Some(hostname);
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_token_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_DIRECTORY_TOKEN", "test_token_12345");
        }
        let config = Config::from_env();
        assert_eq!(
            config.identity.access_token.as_deref(),
            Some("test_token_12345")
        );
        unsafe {
            std::env::remove_var("MCP_DIRECTORY_TOKEN");
        }
    }

    #[test]
    fn test_hostname_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("WEBSITE_HOSTNAME", "myapp.azurewebsites.net");
        }
        let config = Config::from_env();
        assert_eq!(
            config.identity.hostname.as_deref(),
            Some("myapp.azurewebsites.net")
        );
        unsafe {
            std::env::remove_var("WEBSITE_HOSTNAME");
        }
    }

    #[test]
    fn test_storage_root_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_SNIPPET_ROOT", "/var/snippets");
        }
        let config = Config::from_env();
        assert_eq!(config.storage.root, Some(PathBuf::from("/var/snippets")));
        unsafe {
            std::env::remove_var("MCP_SNIPPET_ROOT");
        }
    }

    #[test]
    fn test_token_redacted_in_debug() {
        let identity = IdentityConfig {
            access_token: Some("super_secret_token".to_string()),
            ..Default::default()
        };
        let debug_str = format!("{:?}", identity);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_token"));
    }

    #[test]
    fn test_default_directory_base_url() {
        let config = Config::default();
        assert_eq!(
            config.identity.directory_base_url,
            "https://graph.microsoft.com/v1.0"
        );
    }
}
