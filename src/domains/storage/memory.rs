//! In-memory snippet store.
//!
//! Used as the test double for the blob collaborator, and as the default
//! ephemeral store when no storage root is configured.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::error::StorageError;
use super::store::{SnippetStore, validate_key};

/// Snippet store keeping all blobs in a process-local map.
#[derive(Debug, Default)]
pub struct MemorySnippetStore {
    blobs: RwLock<BTreeMap<String, String>>,
}

impl MemorySnippetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blobs.
    pub async fn len(&self) -> usize {
        self.blobs.read().await.len()
    }

    /// Whether the store holds no blobs.
    pub async fn is_empty(&self) -> bool {
        self.blobs.read().await.is_empty()
    }
}

#[async_trait]
impl SnippetStore for MemorySnippetStore {
    async fn read(&self, key: &str) -> Result<String, StorageError> {
        validate_key(key)?;
        self.blobs
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::not_found(key))
    }

    async fn write(&self, key: &str, content: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.blobs
            .write()
            .await
            .insert(key.to_string(), content.to_string());
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        validate_key(key)?;
        Ok(self.blobs.read().await.contains_key(key))
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        Ok(self
            .blobs
            .read()
            .await
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::storage::store::snippet_key;

    #[tokio::test]
    async fn test_roundtrip_and_overwrite() {
        let store = MemorySnippetStore::new();
        let key = snippet_key("demo");

        store.write(&key, "v1").await.unwrap();
        store.write(&key, "v2").await.unwrap();
        assert_eq!(store.read(&key).await.unwrap(), "v2");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_missing_key_is_not_found() {
        let store = MemorySnippetStore::new();
        assert!(store.read("snippets/nope.json").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_list_filters_by_prefix() {
        let store = MemorySnippetStore::new();
        store.write("snippets/a.json", "a").await.unwrap();
        store.write("other/b.json", "b").await.unwrap();

        let keys = store.list("snippets/").await.unwrap();
        assert_eq!(keys, vec!["snippets/a.json"]);
    }
}
