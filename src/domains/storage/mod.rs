//! Storage domain - the key-value blob collaborator for snippets.
//!
//! The tools only see the [`SnippetStore`] trait; the concrete backend is
//! chosen at startup (filesystem in production, in-memory otherwise).

mod error;
mod fs;
mod memory;
mod store;

pub use error::StorageError;
pub use fs::FsSnippetStore;
pub use memory::MemorySnippetStore;
pub use store::{SNIPPET_PREFIX, SnippetStore, snippet_key, snippet_name, validate_key};
