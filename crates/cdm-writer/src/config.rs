//! Configuration for the manifest writer
//!
//! This module contains the configuration type and its validation.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use cdm_core::{split_corpus_path, CDM_DOCUMENT_SUFFIX};

use crate::error::{WriterError, WriterResult};

/// Writer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriterConfig {
    /// Storage account name; the remote host is `<account>.<storage_host_suffix>`
    #[serde(default)]
    pub storage_account_name: Option<String>,

    /// `<filesystem>/<sub/path>` the remote namespace is rooted at
    #[serde(default)]
    pub storage_path: Option<String>,

    /// DNS suffix of the Data Lake endpoint
    #[serde(default = "default_storage_host_suffix")]
    pub storage_host_suffix: String,

    /// Namespace reserved for the standard schema documents
    #[serde(default = "default_schema_namespace")]
    pub schema_namespace: String,

    /// Namespace of the remote object store
    #[serde(default = "default_remote_namespace")]
    pub remote_namespace: String,

    /// File name manifests are saved as
    #[serde(default = "default_manifest_file_name")]
    pub manifest_file_name: String,

    /// Schema documents every new entity document imports
    #[serde(default = "default_entity_doc_imports")]
    pub entity_doc_imports: Vec<String>,

    /// Write simple references as plain strings
    #[serde(default = "default_string_refs")]
    pub string_refs: bool,
}

fn default_storage_host_suffix() -> String {
    "dfs.core.windows.net".to_string()
}

fn default_schema_namespace() -> String {
    "cdm".to_string()
}

fn default_remote_namespace() -> String {
    "adls2".to_string()
}

fn default_manifest_file_name() -> String {
    "default.manifest.cdm.json".to_string()
}

fn default_entity_doc_imports() -> Vec<String> {
    vec!["cdm:/foundations.cdm.json".to_string()]
}

fn default_string_refs() -> bool {
    true
}

fn is_valid_namespace(namespace: &str) -> bool {
    !namespace.is_empty() && !namespace.contains(':') && !namespace.contains('/')
}

impl WriterConfig {
    /// Configuration for a storage account and path, all else default
    pub fn new(storage_account_name: Option<&str>, storage_path: Option<&str>) -> Self {
        Self {
            storage_account_name: storage_account_name.map(str::to_string),
            storage_path: storage_path.map(str::to_string),
            ..Self::default()
        }
    }

    /// Parse and validate a JSON configuration document
    pub fn from_json(json: &str) -> WriterResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        info!("Loaded writer configuration");
        Ok(config)
    }

    /// Check the configuration for values that would break mounting or saving
    pub fn validate(&self) -> WriterResult<()> {
        if !is_valid_namespace(&self.schema_namespace) {
            return Err(WriterError::Config(format!(
                "Invalid schema namespace: '{}'",
                self.schema_namespace
            )));
        }
        if !is_valid_namespace(&self.remote_namespace) {
            return Err(WriterError::Config(format!(
                "Invalid remote namespace: '{}'",
                self.remote_namespace
            )));
        }
        if self.schema_namespace == self.remote_namespace {
            return Err(WriterError::Config(
                "Schema and remote namespaces must differ".to_string(),
            ));
        }
        if self.storage_host_suffix.trim().is_empty() {
            return Err(WriterError::Config(
                "Storage host suffix is required".to_string(),
            ));
        }
        if !self.manifest_file_name.ends_with(CDM_DOCUMENT_SUFFIX)
            || self.manifest_file_name.len() == CDM_DOCUMENT_SUFFIX.len()
        {
            return Err(WriterError::Config(format!(
                "Manifest file name must end with {}: '{}'",
                CDM_DOCUMENT_SUFFIX, self.manifest_file_name
            )));
        }

        for import in &self.entity_doc_imports {
            let (_, path) = split_corpus_path(import)
                .map_err(|_| WriterError::Config(format!("Invalid import corpus path: '{}'", import)))?;
            if !path.ends_with(CDM_DOCUMENT_SUFFIX) {
                return Err(WriterError::Config(format!(
                    "Import must reference a {} document: '{}'",
                    CDM_DOCUMENT_SUFFIX, import
                )));
            }
        }

        if self.storage_account_name.is_none() || self.storage_path.is_none() {
            warn!("No storage account or path configured - only mount_with_adapter() can be used");
        }

        Ok(())
    }

    /// Data Lake host, if an account is configured
    pub fn remote_host(&self) -> Option<String> {
        self.storage_account_name
            .as_ref()
            .map(|account| format!("{}.{}", account, self.storage_host_suffix))
    }

    /// Corpus path of the foundational schema document
    pub fn foundations_import(&self) -> String {
        format!("{}:/foundations.cdm.json", self.schema_namespace)
    }
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            storage_account_name: None,
            storage_path: None,
            storage_host_suffix: default_storage_host_suffix(),
            schema_namespace: default_schema_namespace(),
            remote_namespace: default_remote_namespace(),
            manifest_file_name: default_manifest_file_name(),
            entity_doc_imports: default_entity_doc_imports(),
            string_refs: default_string_refs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WriterConfig::default();

        assert_eq!(config.schema_namespace, "cdm");
        assert_eq!(config.remote_namespace, "adls2");
        assert_eq!(config.manifest_file_name, "default.manifest.cdm.json");
        assert_eq!(config.entity_doc_imports, vec!["cdm:/foundations.cdm.json".to_string()]);
        assert!(config.string_refs);
        assert!(config.remote_host().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_remote_host() {
        let config = WriterConfig::new(Some("mylake"), Some("gist/test"));
        assert_eq!(config.remote_host().unwrap(), "mylake.dfs.core.windows.net");
        assert_eq!(config.storage_path.as_deref(), Some("gist/test"));
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = WriterConfig::from_json(
            r#"{
                "storage_account_name": "mylake",
                "storage_path": "gist/test",
                "entity_doc_imports": ["cdm:/foundations.cdm.json", "cdm:/primitives.cdm.json"]
            }"#,
        )
        .unwrap();

        assert_eq!(config.remote_namespace, "adls2");
        assert_eq!(config.entity_doc_imports.len(), 2);
    }

    #[test]
    fn test_from_json_rejects_malformed_input() {
        assert!(matches!(WriterConfig::from_json("{"), Err(WriterError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bad_imports() {
        let mut config = WriterConfig::default();
        config.entity_doc_imports = vec!["foundations.cdm.json".to_string()];
        assert!(matches!(config.validate(), Err(WriterError::Config(_))));

        config.entity_doc_imports = vec!["cdm:/foundations.json".to_string()];
        assert!(matches!(config.validate(), Err(WriterError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bad_namespaces() {
        let mut config = WriterConfig::default();
        config.remote_namespace = "cdm".to_string();
        assert!(config.validate().is_err());

        config.remote_namespace = "ad:ls".to_string();
        assert!(config.validate().is_err());

        config.remote_namespace = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_manifest_name() {
        let mut config = WriterConfig::default();
        config.manifest_file_name = "default.json".to_string();
        assert!(config.validate().is_err());

        config.manifest_file_name = ".cdm.json".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_foundations_import_follows_schema_namespace() {
        let mut config = WriterConfig::default();
        assert_eq!(config.foundations_import(), "cdm:/foundations.cdm.json");

        config.schema_namespace = "std".to_string();
        assert_eq!(config.foundations_import(), "std:/foundations.cdm.json");
    }
}
