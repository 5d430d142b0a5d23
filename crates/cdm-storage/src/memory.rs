//! In-memory implementation of StorageAdapter
//!
//! This implementation is primarily intended for testing and development purposes.

use crate::{normalize_path, StorageAdapter, StorageError, StorageResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of StorageAdapter
///
/// This implementation stores documents in memory and records every write in
/// order, so callers can assert exactly what a save produced.
/// All data is lost when the last clone is dropped.
#[derive(Debug, Clone)]
pub struct InMemoryAdapter {
    documents: Arc<RwLock<HashMap<String, String>>>,
    writes: Arc<RwLock<Vec<String>>>,
    read_only: bool,
}

impl InMemoryAdapter {
    /// Create a new, writable in-memory adapter
    pub fn new() -> Self {
        Self {
            documents: Arc::new(RwLock::new(HashMap::new())),
            writes: Arc::new(RwLock::new(Vec::new())),
            read_only: false,
        }
    }

    /// Create a read-only adapter pre-populated with documents
    pub fn read_only(documents: HashMap<String, String>) -> Self {
        let documents = documents
            .into_iter()
            .filter_map(|(path, data)| normalize_path(&path).ok().map(|p| (p, data)))
            .collect();

        Self {
            documents: Arc::new(RwLock::new(documents)),
            writes: Arc::new(RwLock::new(Vec::new())),
            read_only: true,
        }
    }

    /// Paths written so far, in write order (repeated writes appear repeatedly)
    pub async fn write_log(&self) -> Vec<String> {
        self.writes.read().await.clone()
    }

    /// All stored paths, sorted
    pub async fn paths(&self) -> Vec<String> {
        let store = self.documents.read().await;
        let mut paths: Vec<String> = store.keys().cloned().collect();
        paths.sort();
        paths
    }
}

impl Default for InMemoryAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StorageAdapter for InMemoryAdapter {
    fn can_read(&self) -> bool {
        true
    }

    fn can_write(&self) -> bool {
        !self.read_only
    }

    async fn read(&self, path: &str) -> StorageResult<String> {
        let key = normalize_path(path)?;
        let store = self.documents.read().await;

        match store.get(&key) {
            Some(data) => Ok(data.clone()),
            None => Err(StorageError::NotFound(key)),
        }
    }

    async fn write(&self, path: &str, data: &str) -> StorageResult<()> {
        if self.read_only {
            return Err(StorageError::ReadOnly("memory".to_string()));
        }
        let key = normalize_path(path)?;

        let mut store = self.documents.write().await;
        store.insert(key.clone(), data.to_string());
        self.writes.write().await.push(key);

        Ok(())
    }

    async fn exists(&self, path: &str) -> StorageResult<bool> {
        let key = normalize_path(path)?;
        let store = self.documents.read().await;

        Ok(store.contains_key(&key))
    }

    /// Convert to Any for downcasting
    fn as_any(&self) -> &dyn std::any::Any where Self: 'static {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_and_read() {
        let adapter = InMemoryAdapter::new();

        adapter.write("Customer.cdm.json", "{}").await.unwrap();

        let data = adapter.read("/Customer.cdm.json").await.unwrap();
        assert_eq!(data, "{}");
        assert_eq!(adapter.paths().await, vec!["/Customer.cdm.json".to_string()]);
    }

    #[tokio::test]
    async fn test_read_missing_document() {
        let adapter = InMemoryAdapter::new();

        let result = adapter.read("/missing.cdm.json").await;
        match result {
            Err(StorageError::NotFound(path)) => assert_eq!(path, "/missing.cdm.json"),
            _ => panic!("Expected StorageError::NotFound"),
        }
    }

    #[tokio::test]
    async fn test_exists() {
        let adapter = InMemoryAdapter::new();
        assert!(!adapter.exists("/a.cdm.json").await.unwrap());

        adapter.write("/a.cdm.json", "{}").await.unwrap();
        assert!(adapter.exists("/a.cdm.json").await.unwrap());
    }

    #[tokio::test]
    async fn test_overwrite_is_logged_twice() {
        let adapter = InMemoryAdapter::new();

        adapter.write("/a.cdm.json", "1").await.unwrap();
        adapter.write("/a.cdm.json", "2").await.unwrap();

        assert_eq!(adapter.read("/a.cdm.json").await.unwrap(), "2");
        assert_eq!(adapter.write_log().await.len(), 2);
        assert_eq!(adapter.paths().await.len(), 1);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let adapter = InMemoryAdapter::new();
        let clone = adapter.clone();

        clone.write("/shared.cdm.json", "{}").await.unwrap();
        assert!(adapter.exists("/shared.cdm.json").await.unwrap());
    }

    #[tokio::test]
    async fn test_read_only_adapter() {
        let mut docs = HashMap::new();
        docs.insert("foundations.cdm.json".to_string(), "{\"imports\":[]}".to_string());
        let adapter = InMemoryAdapter::read_only(docs);

        assert!(adapter.can_read());
        assert!(!adapter.can_write());
        assert!(adapter.read("/foundations.cdm.json").await.is_ok());

        let result = adapter.write("/x.cdm.json", "{}").await;
        assert!(matches!(result, Err(StorageError::ReadOnly(_))));
        assert!(adapter.write_log().await.is_empty());
    }
}
