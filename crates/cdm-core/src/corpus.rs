//! Corpus arena
//!
//! The corpus owns every object of the graph and the storage mounts. Objects
//! are created through the `make_*`/`define_*` methods and addressed through
//! the handles they return.

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};

use cdm_storage::{normalize_path, StorageError};

use crate::domain::attribute::TypeAttributeDefinition;
use crate::domain::document::DocumentDefinition;
use crate::domain::entity::EntityDefinition;
use crate::domain::manifest::{manifest_name_from_file, ManifestDefinition};
use crate::error::{CdmError, CdmResult};
use crate::persistence::{self, DocumentContent, ManifestContent};
use crate::storage::{make_corpus_path, split_corpus_path, StorageManager};
use crate::types::{next_corpus_id, AttributeId, CopyOptions, DocumentId, EntityId, ManifestId};

/// Outcome of a successful save
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReport {
    /// Corpus path the manifest was written to
    pub manifest_path: String,

    /// Corpus paths of the referenced documents, in write order
    pub document_paths: Vec<String>,
}

impl SaveReport {
    /// Total number of files written
    pub fn files_written(&self) -> usize {
        1 + self.document_paths.len()
    }
}

/// Root context: storage mounts plus the object arena
#[derive(Debug)]
pub struct Corpus {
    /// Namespace mounts and root folders
    pub storage: StorageManager,

    id: u64,

    manifests: Vec<ManifestDefinition>,
    documents: Vec<DocumentDefinition>,
    entities: Vec<EntityDefinition>,
    attributes: Vec<TypeAttributeDefinition>,
}

fn lookup<'a, T>(
    items: &'a [T],
    owner: u64,
    corpus: u64,
    index: usize,
    label: &dyn std::fmt::Display,
) -> CdmResult<&'a T> {
    items
        .get(index)
        .filter(|_| corpus == owner)
        .ok_or_else(|| CdmError::ObjectNotFound(label.to_string()))
}

fn lookup_mut<'a, T>(
    items: &'a mut [T],
    owner: u64,
    corpus: u64,
    index: usize,
    label: &dyn std::fmt::Display,
) -> CdmResult<&'a mut T> {
    items
        .get_mut(index)
        .filter(|_| corpus == owner)
        .ok_or_else(|| CdmError::ObjectNotFound(label.to_string()))
}

impl Default for Corpus {
    fn default() -> Self {
        Self {
            storage: StorageManager::new(),
            id: next_corpus_id(),
            manifests: Vec::new(),
            documents: Vec::new(),
            entities: Vec::new(),
            attributes: Vec::new(),
        }
    }
}

impl Corpus {
    /// Create an empty corpus with no mounts
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a manifest stored as `name`
    pub fn make_manifest(&mut self, name: &str) -> ManifestId {
        self.manifests.push(ManifestDefinition::new(name));
        let id = ManifestId::new(self.id, self.manifests.len() - 1);
        debug!(manifest = %id, name, "Created manifest");
        id
    }

    /// Create a document named `name`
    pub fn make_document(&mut self, name: &str, is_entity_document: bool) -> DocumentId {
        self.documents.push(DocumentDefinition::new(name, is_entity_document));
        let id = DocumentId::new(self.id, self.documents.len() - 1);
        debug!(document = %id, name, "Created document");
        id
    }

    /// Create a free-standing type attribute
    pub fn make_type_attribute(&mut self, name: &str) -> AttributeId {
        self.attributes.push(TypeAttributeDefinition::new(name));
        AttributeId::new(self.id, self.attributes.len() - 1)
    }

    /// Define a new entity inside `document`
    pub fn define_entity(&mut self, document: DocumentId, name: &str) -> CdmResult<EntityId> {
        let id = EntityId::new(self.id, self.entities.len());
        lookup_mut(&mut self.documents, self.id, document.corpus, document.index, &document)?
            .definitions
            .push(id);
        self.entities.push(EntityDefinition::new(name));
        debug!(entity = %id, document = %document, name, "Defined entity");
        Ok(id)
    }

    /// Manifest behind a handle
    pub fn manifest(&self, id: ManifestId) -> CdmResult<&ManifestDefinition> {
        lookup(&self.manifests, self.id, id.corpus, id.index, &id)
    }

    /// Mutable manifest behind a handle
    pub fn manifest_mut(&mut self, id: ManifestId) -> CdmResult<&mut ManifestDefinition> {
        lookup_mut(&mut self.manifests, self.id, id.corpus, id.index, &id)
    }

    /// Document behind a handle
    pub fn document(&self, id: DocumentId) -> CdmResult<&DocumentDefinition> {
        lookup(&self.documents, self.id, id.corpus, id.index, &id)
    }

    /// Mutable document behind a handle
    pub fn document_mut(&mut self, id: DocumentId) -> CdmResult<&mut DocumentDefinition> {
        lookup_mut(&mut self.documents, self.id, id.corpus, id.index, &id)
    }

    /// Entity behind a handle
    pub fn entity(&self, id: EntityId) -> CdmResult<&EntityDefinition> {
        lookup(&self.entities, self.id, id.corpus, id.index, &id)
    }

    /// Mutable entity behind a handle
    pub fn entity_mut(&mut self, id: EntityId) -> CdmResult<&mut EntityDefinition> {
        lookup_mut(&mut self.entities, self.id, id.corpus, id.index, &id)
    }

    /// Attribute behind a handle
    pub fn attribute(&self, id: AttributeId) -> CdmResult<&TypeAttributeDefinition> {
        lookup(&self.attributes, self.id, id.corpus, id.index, &id)
    }

    /// Mutable attribute behind a handle
    pub fn attribute_mut(&mut self, id: AttributeId) -> CdmResult<&mut TypeAttributeDefinition> {
        lookup_mut(&mut self.attributes, self.id, id.corpus, id.index, &id)
    }

    /// Document whose definition list contains `entity`
    pub fn owning_document(&self, entity: EntityId) -> CdmResult<DocumentId> {
        self.documents
            .iter()
            .position(|d| d.defines(entity))
            .map(|index| DocumentId::new(self.id, index))
            .ok_or_else(|| CdmError::ObjectNotFound(format!("document defining {}", entity)))
    }

    /// Distinct documents defining the entities declared in `manifest`, in declaration order
    pub fn referenced_documents(&self, manifest: ManifestId) -> CdmResult<Vec<DocumentId>> {
        let mut documents = Vec::new();
        for declaration in &self.manifest(manifest)?.entities {
            let document = self.owning_document(declaration.entity)?;
            if !documents.contains(&document) {
                documents.push(document);
            }
        }
        Ok(documents)
    }

    /// Write `manifest` as `file_name` at the root of `namespace`, followed by
    /// every document defining one of its declared entities.
    ///
    /// Each referenced document must be an object entry of the namespace's
    /// root folder or one of its child folders, and is written under that
    /// folder's path. Every path is resolved and every document serialised
    /// before the first write.
    pub async fn save_manifest_as(
        &self,
        manifest: ManifestId,
        namespace: &str,
        file_name: &str,
        options: &CopyOptions,
    ) -> CdmResult<SaveReport> {
        let adapter = self.storage.fetch_adapter(namespace)?;
        if !adapter.can_write() {
            return Err(StorageError::ReadOnly(namespace.to_string()).into());
        }

        let root = self.storage.fetch_root_folder(namespace)?;
        let mut pending = Vec::new();
        for document in self.referenced_documents(manifest)? {
            let name = &self.document(document)?.name;
            let folder = root.document_folder_path(document).ok_or_else(|| {
                CdmError::DocumentNotInFolder {
                    document: name.clone(),
                    namespace: namespace.to_string(),
                }
            })?;
            let path = normalize_path(&format!("{}{}", folder, name))?;
            let content = to_json(&persistence::document_content(self, document, options)?)?;
            pending.push((path, content));
        }

        let manifest_path = normalize_path(file_name)?;
        let content =
            persistence::manifest_content(self, manifest, &manifest_name_from_file(file_name))?;
        adapter.write(&manifest_path, &to_json(&content)?).await?;

        let mut document_paths = Vec::with_capacity(pending.len());
        for (path, content) in pending {
            adapter.write(&path, &content).await?;
            document_paths.push(make_corpus_path(namespace, &path)?);
        }

        let report = SaveReport {
            manifest_path: make_corpus_path(namespace, &manifest_path)?,
            document_paths,
        };
        info!(
            manifest = %report.manifest_path,
            documents = report.document_paths.len(),
            "Saved manifest"
        );
        Ok(report)
    }

    /// Read a persisted manifest back from a corpus path
    pub async fn load_manifest_content(&self, corpus_path: &str) -> CdmResult<ManifestContent> {
        self.load_json(corpus_path).await
    }

    /// Read a persisted entity document back from a corpus path
    pub async fn load_document_content(&self, corpus_path: &str) -> CdmResult<DocumentContent> {
        self.load_json(corpus_path).await
    }

    async fn load_json<T: DeserializeOwned>(&self, corpus_path: &str) -> CdmResult<T> {
        let (namespace, path) = split_corpus_path(corpus_path)?;
        let adapter = self.storage.fetch_adapter(namespace)?;
        let data = adapter.read(path).await?;
        Ok(serde_json::from_str(&data)?)
    }
}

fn to_json<T: Serialize>(content: &T) -> CdmResult<String> {
    Ok(serde_json::to_string_pretty(content)?)
}
