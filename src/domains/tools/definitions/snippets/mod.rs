//! Snippet tool definitions.
//!
//! Snippets are stored one blob per snippet in the storage collaborator,
//! keyed `snippets/{name}.json`. Single get/save operate on raw content;
//! bulk save persists the full snippet record; search filters the stored
//! catalog.

mod bulk_save;
mod get;
mod save;
mod search;

pub use bulk_save::{BulkSaveSnippetsParams, BulkSaveSnippetsTool};
pub use get::{GetSnippetParams, GetSnippetTool};
pub use save::{SaveSnippetParams, SaveSnippetTool};
pub use search::{SearchCriteria, SearchSnippetsParams, SearchSnippetsTool};

use serde::{Deserialize, Serialize};

/// Property carrying the snippet name.
pub const SNIPPET_NAME_PROPERTY: &str = "snippetname";

/// Property carrying the snippet content.
pub const SNIPPET_PROPERTY: &str = "snippet";

/// A stored snippet with its metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SnippetInfo {
    /// Snippet name; must be non-empty to be persisted.
    #[serde(default)]
    pub name: String,

    /// The snippet text itself.
    #[serde(default)]
    pub content: String,

    /// Human-readable description.
    #[serde(default)]
    pub description: String,

    /// Tags used for searching.
    #[serde(default)]
    pub tags: Vec<String>,
}
