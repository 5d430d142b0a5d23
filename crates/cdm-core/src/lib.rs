//!
//! CDM Core - a minimal Common Data Model object graph
//!
//! This crate owns the object model the manifest writer builds: a [`Corpus`]
//! arena holding manifests, documents, entities and type attributes, the
//! [`StorageManager`] that maps namespaces to storage adapters and root
//! folders, and the CDM JSON persistence of manifests and entity documents.
//!
//! Callers never hold references into the graph. Every object is addressed by
//! a small `Copy` handle ([`ManifestId`], [`DocumentId`], [`EntityId`],
//! [`AttributeId`]) issued by the corpus that owns it.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Domain layer - folders, manifests, documents, entities, attributes, traits
pub mod domain;

/// Core types - handles, data formats, copy options
pub mod types;

/// Error types
pub mod error;

/// Namespace mounts and corpus paths
pub mod storage;

/// Corpus arena and save logic
pub mod corpus;

/// CDM JSON persistence shapes
pub mod persistence;

// Re-export key types
pub use corpus::{Corpus, SaveReport};
pub use error::{CdmError, CdmResult};
pub use storage::{make_corpus_path, split_corpus_path, StorageManager};
pub use types::{AttributeId, CopyOptions, DataFormat, DocumentId, EntityId, ManifestId};

pub use domain::attribute::{AttributeItem, TypeAttributeDefinition};
pub use domain::document::{DocumentDefinition, ImportReference};
pub use domain::entity::EntityDefinition;
pub use domain::folder::{FolderDefinition, FolderItem};
pub use domain::manifest::{EntityDeclaration, ManifestDefinition};
pub use domain::trait_reference::TraitReference;

/// File suffix of every CDM document
pub const CDM_DOCUMENT_SUFFIX: &str = ".cdm.json";

/// File suffix of CDM manifests
pub const MANIFEST_SUFFIX: &str = ".manifest.cdm.json";

/// Schema version written into persisted documents
pub const JSON_SCHEMA_SEMANTIC_VERSION: &str = "1.0.0";
