//! Shared context handed to tool handlers.
//!
//! Bundles the collaborators and injected configuration the handlers need,
//! so no handler reads the process environment or builds clients ad hoc.

use std::sync::Arc;

use crate::core::config::Config;
use crate::domains::identity::{DirectoryClient, HttpDirectoryClient, StaticTokenProvider};
use crate::domains::storage::{FsSnippetStore, MemorySnippetStore, SnippetStore};

/// Collaborators and settings shared by all tool handlers.
pub struct ToolContext {
    /// Key-value blob store for snippet content.
    pub store: Arc<dyn SnippetStore>,

    /// Directory client resolving the caller's profile.
    pub directory: Arc<dyn DirectoryClient>,

    /// Deployment hostname used to build the consent URL, when known.
    pub consent_hostname: Option<String>,
}

impl ToolContext {
    /// Build the production context from configuration.
    ///
    /// Without a configured storage root, snippets live in an ephemeral
    /// in-memory store for the process lifetime.
    pub fn from_config(config: &Config) -> Self {
        let store: Arc<dyn SnippetStore> = match &config.storage.root {
            Some(root) => Arc::new(FsSnippetStore::new(root)),
            None => Arc::new(MemorySnippetStore::new()),
        };

        let token_provider = Arc::new(StaticTokenProvider::new(
            config.identity.access_token.clone(),
        ));
        let directory: Arc<dyn DirectoryClient> = Arc::new(HttpDirectoryClient::new(
            config.identity.directory_base_url.clone(),
            token_provider,
        ));

        Self {
            store,
            directory,
            consent_hostname: config.identity.hostname.clone(),
        }
    }

    /// Replace the directory client (used when wiring test doubles).
    pub fn with_directory(mut self, directory: Arc<dyn DirectoryClient>) -> Self {
        self.directory = directory;
        self
    }

    /// Replace the snippet store (used when wiring test doubles).
    pub fn with_store(mut self, store: Arc<dyn SnippetStore>) -> Self {
        self.store = store;
        self
    }
}
