//! Persisting the built manifest to the remote namespace

use tracing::{error, info};

use cdm_core::{CopyOptions, ManifestId, SaveReport};

use crate::error::WriterResult;
use crate::writer::ManifestWriter;

impl ManifestWriter {
    /// Save `manifest` and its entity documents at the root of the remote
    /// namespace under the configured manifest file name.
    pub async fn save(&self, manifest: ManifestId) -> WriterResult<SaveReport> {
        self.save_as(manifest, &self.config.manifest_file_name).await
    }

    /// Save `manifest` as `file_name` at the root of the remote namespace.
    ///
    /// Every entity document the manifest references must have been added to
    /// the remote root folder or one of its child folders; otherwise nothing
    /// is written.
    pub async fn save_as(&self, manifest: ManifestId, file_name: &str) -> WriterResult<SaveReport> {
        let options = CopyOptions {
            string_refs: self.config.string_refs,
        };
        let namespace = &self.config.remote_namespace;

        let result = self
            .corpus()?
            .save_manifest_as(manifest, namespace, file_name, &options)
            .await;

        match result {
            Ok(report) => {
                info!(
                    saved = true,
                    manifest = %report.manifest_path,
                    files = report.files_written(),
                    "Manifest saved"
                );
                Ok(report)
            }
            Err(e) => {
                error!(saved = false, file_name, error = %e, "Manifest save failed");
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use cdm_core::{CdmError, ManifestId};
    use cdm_storage::{InMemoryAdapter, StorageAdapter, StorageError};

    use crate::config::WriterConfig;
    use crate::error::WriterError;
    use crate::writer::ManifestWriter;

    fn customer_model(writer: &mut ManifestWriter, register_doc: bool) -> ManifestId {
        let manifest = writer.new_manifest(None).unwrap();
        let document = if register_doc {
            writer.add_entity_doc("Customer").unwrap()
        } else {
            let corpus = writer.corpus_mut().unwrap();
            corpus.make_document("Customer.cdm.json", true)
        };
        let entity = writer.add_entity("Customer", document, manifest).unwrap();
        let attribute = writer.new_attribute("Name").unwrap();
        writer.add_attribute(attribute, entity).unwrap();
        writer.add_trait("is.sensitive", entity, attribute).unwrap();
        manifest
    }

    #[tokio::test]
    async fn test_save_writes_manifest_and_documents() {
        let remote = InMemoryAdapter::new();
        let mut writer = ManifestWriter::new(WriterConfig::default(), None).unwrap();
        writer.mount_with_adapter(Arc::new(remote.clone()));
        let manifest = customer_model(&mut writer, true);

        let report = writer.save(manifest).await.unwrap();

        assert_eq!(report.manifest_path, "adls2:/default.manifest.cdm.json");
        assert_eq!(report.document_paths, vec!["adls2:/Customer.cdm.json".to_string()]);
        assert_eq!(report.files_written(), 2);
        assert_eq!(
            remote.write_log().await,
            vec!["/default.manifest.cdm.json".to_string(), "/Customer.cdm.json".to_string()]
        );

        let corpus = writer.corpus().unwrap();
        let saved = corpus
            .load_manifest_content("adls2:/default.manifest.cdm.json")
            .await
            .unwrap();
        assert_eq!(saved.manifest_name, "default");
        assert_eq!(saved.entities[0].entity_path, "Customer.cdm.json/Customer");

        let document = corpus.load_document_content("adls2:/Customer.cdm.json").await.unwrap();
        assert_eq!(document.definitions[0].exhibits_traits[0].name(), "is.sensitive");
    }

    #[tokio::test]
    async fn test_save_as_uses_given_name() {
        let remote = InMemoryAdapter::new();
        let mut writer = ManifestWriter::new(WriterConfig::default(), None).unwrap();
        writer.mount_with_adapter(Arc::new(remote.clone()));
        let manifest = customer_model(&mut writer, true);

        let report = writer.save_as(manifest, "sales.manifest.cdm.json").await.unwrap();

        assert_eq!(report.manifest_path, "adls2:/sales.manifest.cdm.json");
        assert!(remote.exists("sales.manifest.cdm.json").await.unwrap());
    }

    #[tokio::test]
    async fn test_save_fails_for_unregistered_document() {
        let remote = InMemoryAdapter::new();
        let mut writer = ManifestWriter::new(WriterConfig::default(), None).unwrap();
        writer.mount_with_adapter(Arc::new(remote.clone()));
        let manifest = customer_model(&mut writer, false);

        let result = writer.save(manifest).await;

        assert!(matches!(
            result,
            Err(WriterError::Core(CdmError::DocumentNotInFolder { .. }))
        ));
        assert!(remote.write_log().await.is_empty());
    }

    #[tokio::test]
    async fn test_save_with_invalid_entity_name_writes_nothing() {
        let remote = InMemoryAdapter::new();
        let mut writer = ManifestWriter::new(WriterConfig::default(), None).unwrap();
        writer.mount_with_adapter(Arc::new(remote.clone()));
        let manifest = writer.new_manifest(None).unwrap();
        let document = writer.add_entity_doc("../Evil").unwrap();
        writer.add_entity("Evil", document, manifest).unwrap();

        let result = writer.save(manifest).await;

        assert!(matches!(
            result,
            Err(WriterError::Core(CdmError::Storage(StorageError::InvalidPath(_))))
        ));
        assert!(remote.write_log().await.is_empty());
    }

    #[tokio::test]
    async fn test_save_writes_child_folder_documents() {
        let remote = InMemoryAdapter::new();
        let mut writer = ManifestWriter::new(WriterConfig::default(), None).unwrap();
        writer.mount_with_adapter(Arc::new(remote.clone()));
        let manifest = customer_model(&mut writer, false);
        let document = writer.corpus().unwrap().referenced_documents(manifest).unwrap()[0];
        writer.add_to_child_folder("raw", document).unwrap();

        let report = writer.save(manifest).await.unwrap();

        assert_eq!(report.document_paths, vec!["adls2:/raw/Customer.cdm.json".to_string()]);
        assert!(remote.exists("raw/Customer.cdm.json").await.unwrap());
    }

    #[tokio::test]
    async fn test_save_reports_read_only_storage() {
        let mut writer = ManifestWriter::new(WriterConfig::default(), None).unwrap();
        writer.mount_with_adapter(Arc::new(InMemoryAdapter::read_only(HashMap::new())));
        let manifest = customer_model(&mut writer, true);

        let result = writer.save(manifest).await;

        assert!(matches!(
            result,
            Err(WriterError::Core(CdmError::Storage(StorageError::ReadOnly(_))))
        ));
    }

    #[tokio::test]
    async fn test_save_before_mount_fails() {
        let mut mounted = ManifestWriter::new(WriterConfig::default(), None).unwrap();
        mounted.mount_with_adapter(Arc::new(InMemoryAdapter::new()));
        let manifest = mounted.new_manifest(None).unwrap();

        let writer = ManifestWriter::new(WriterConfig::default(), None).unwrap();
        assert!(matches!(writer.save(manifest).await, Err(WriterError::NotMounted)));
    }

    #[tokio::test]
    async fn test_save_respects_string_refs_option() {
        let remote = InMemoryAdapter::new();
        let mut config = WriterConfig::default();
        config.string_refs = false;
        let mut writer = ManifestWriter::new(config, None).unwrap();
        writer.mount_with_adapter(Arc::new(remote.clone()));
        let manifest = customer_model(&mut writer, true);

        writer.save(manifest).await.unwrap();

        let raw = remote.read("Customer.cdm.json").await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            json["definitions"][0]["exhibitsTraits"][0]["traitReference"],
            "is.sensitive"
        );
    }
}
