//!
//! CDM Writer - builds a Common Data Model manifest and saves it to Azure Data Lake Storage
//!
//! A [`ManifestWriter`] owns a corpus with two namespaces mounted: the
//! read-only standard schema namespace (`cdm` by default) and the remote
//! Data Lake namespace (`adls2` by default). Callers build a manifest out of
//! entity documents, entities, text attributes and traits, then save it in
//! one call.
//!
//! ```no_run
//! use std::sync::Arc;
//! use cdm_writer::{ManifestWriter, StaticTokenCredential, WriterResult};
//!
//! # async fn example() -> WriterResult<()> {
//! let mut writer = ManifestWriter::from_parts(
//!     Some("mylake"),
//!     Some("gist/test"),
//!     Some(Arc::new(StaticTokenCredential::new("token"))),
//! )?;
//! writer.authenticate().await;
//! writer.mount()?;
//!
//! let manifest = writer.new_manifest(None)?;
//! let document = writer.add_entity_doc("Customer")?;
//! let entity = writer.add_entity("Customer", document, manifest)?;
//! let attribute = writer.new_attribute("Name")?;
//! writer.add_attribute(attribute, entity)?;
//! writer.add_trait("is.sensitive", entity, attribute)?;
//!
//! writer.save(manifest).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Model building operations
pub mod builder;

/// Configuration module
pub mod config;

/// Credential adapter
pub mod credential;

/// Error module
pub mod error;

/// Logging setup
pub mod logging;

/// Save operations
pub mod persister;

/// Corpus session
pub mod writer;

// Re-export key types
pub use config::WriterConfig;
pub use credential::{
    AccessToken, CredentialError, StaticTokenCredential, TokenAdapter, TokenCredential,
    STORAGE_SCOPE,
};
pub use error::{WriterError, WriterResult};
pub use logging::{init_logging, LoggingConfig};
pub use writer::{AuthOutcome, ManifestWriter};

pub use cdm_core::{
    AttributeId, AttributeItem, CdmError, DataFormat, DocumentId, EntityId, FolderItem,
    ManifestId, SaveReport,
};
pub use cdm_storage::{StorageAdapter, StorageError, TokenProvider};
