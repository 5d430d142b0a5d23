//! Namespace mounts and corpus paths
//!
//! A corpus path has the form `<namespace>:/<adapter path>`, for example
//! `cdm:/foundations.cdm.json`. Each mounted namespace owns one storage adapter
//! and one root folder.

use std::collections::BTreeMap;
use std::sync::Arc;

use cdm_storage::{normalize_path, StorageAdapter};
use tracing::debug;

use crate::domain::folder::FolderDefinition;
use crate::error::{CdmError, CdmResult};

/// Split a corpus path into `(namespace, adapter path)`
pub fn split_corpus_path(corpus_path: &str) -> CdmResult<(&str, &str)> {
    match corpus_path.find(":/") {
        Some(index) if index > 0 => {
            let namespace = &corpus_path[..index];
            let path = &corpus_path[index + 1..];
            if path.trim_matches('/').is_empty() {
                return Err(CdmError::InvalidCorpusPath(corpus_path.to_string()));
            }
            Ok((namespace, path))
        }
        _ => Err(CdmError::InvalidCorpusPath(corpus_path.to_string())),
    }
}

/// Join a namespace and an adapter path into a corpus path
pub fn make_corpus_path(namespace: &str, path: &str) -> CdmResult<String> {
    if namespace.is_empty() {
        return Err(CdmError::InvalidCorpusPath(format!(":{}", path)));
    }
    let path = normalize_path(path)?;
    Ok(format!("{}:{}", namespace, path))
}

#[derive(Debug)]
struct Mount {
    adapter: Arc<dyn StorageAdapter>,
    root: FolderDefinition,
}

/// Maps namespaces to storage adapters and root folders
#[derive(Debug, Default)]
pub struct StorageManager {
    mounts: BTreeMap<String, Mount>,
}

impl StorageManager {
    /// Create a manager with no mounts
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount `adapter` under `namespace` with a fresh, empty root folder.
    ///
    /// Mounting an existing namespace replaces both its adapter and its folder.
    pub fn mount(&mut self, namespace: impl Into<String>, adapter: Arc<dyn StorageAdapter>) {
        let namespace = namespace.into();
        debug!(namespace = %namespace, adapter = ?adapter, "Mounting storage adapter");

        let root = FolderDefinition::root(namespace.clone());
        self.mounts.insert(namespace, Mount { adapter, root });
    }

    /// Adapter mounted under `namespace`
    pub fn fetch_adapter(&self, namespace: &str) -> CdmResult<Arc<dyn StorageAdapter>> {
        self.mounts
            .get(namespace)
            .map(|m| Arc::clone(&m.adapter))
            .ok_or_else(|| CdmError::NamespaceNotMounted(namespace.to_string()))
    }

    /// Root folder of `namespace`
    pub fn fetch_root_folder(&self, namespace: &str) -> CdmResult<&FolderDefinition> {
        self.mounts
            .get(namespace)
            .map(|m| &m.root)
            .ok_or_else(|| CdmError::NamespaceNotMounted(namespace.to_string()))
    }

    /// Mutable root folder of `namespace`
    pub fn fetch_root_folder_mut(&mut self, namespace: &str) -> CdmResult<&mut FolderDefinition> {
        self.mounts
            .get_mut(namespace)
            .map(|m| &mut m.root)
            .ok_or_else(|| CdmError::NamespaceNotMounted(namespace.to_string()))
    }

    /// Mounted namespaces, sorted
    pub fn namespaces(&self) -> Vec<&str> {
        self.mounts.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdm_storage::InMemoryAdapter;

    #[test]
    fn test_split_corpus_path() {
        assert_eq!(
            split_corpus_path("cdm:/foundations.cdm.json").unwrap(),
            ("cdm", "/foundations.cdm.json")
        );
        assert_eq!(
            split_corpus_path("adls2:/sub/Customer.cdm.json").unwrap(),
            ("adls2", "/sub/Customer.cdm.json")
        );
        assert!(split_corpus_path("foundations.cdm.json").is_err());
        assert!(split_corpus_path(":/foundations.cdm.json").is_err());
        assert!(split_corpus_path("cdm:/").is_err());
    }

    #[test]
    fn test_make_corpus_path() {
        assert_eq!(
            make_corpus_path("adls2", "default.manifest.cdm.json").unwrap(),
            "adls2:/default.manifest.cdm.json"
        );
        assert!(make_corpus_path("", "x.cdm.json").is_err());
        assert!(make_corpus_path("adls2", "").is_err());
    }

    #[test]
    fn test_mount_and_fetch() {
        let mut storage = StorageManager::new();
        storage.mount("adls2", Arc::new(InMemoryAdapter::new()));
        storage.mount("cdm", Arc::new(InMemoryAdapter::new()));

        assert_eq!(storage.namespaces(), vec!["adls2", "cdm"]);
        assert!(storage.fetch_adapter("adls2").is_ok());
        assert_eq!(storage.fetch_root_folder("adls2").unwrap().namespace, "adls2");
        assert!(matches!(
            storage.fetch_root_folder("missing"),
            Err(CdmError::NamespaceNotMounted(_))
        ));
    }

    #[test]
    fn test_remount_resets_root_folder() {
        let mut storage = StorageManager::new();
        storage.mount("adls2", Arc::new(InMemoryAdapter::new()));
        storage
            .fetch_root_folder_mut("adls2")
            .unwrap()
            .push("Customer.cdm.json");

        storage.mount("adls2", Arc::new(InMemoryAdapter::new()));
        assert!(storage.fetch_root_folder("adls2").unwrap().documents.is_empty());
    }
}
