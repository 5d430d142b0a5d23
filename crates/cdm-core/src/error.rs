use cdm_storage::StorageError;
use thiserror::Error;

/// Error type for corpus operations
#[derive(Error, Debug)]
pub enum CdmError {
    /// A handle does not refer to an object of this corpus
    #[error("Object not found in corpus: {0}")]
    ObjectNotFound(String),

    /// No adapter is mounted under the namespace
    #[error("Namespace not mounted: {0}")]
    NamespaceNotMounted(String),

    /// A saved manifest references a document that is not in the target folder
    #[error("Document '{document}' is not in the root folder of namespace '{namespace}'")]
    DocumentNotInFolder {
        /// Document name
        document: String,
        /// Namespace searched
        namespace: String,
    },

    /// A corpus path could not be parsed
    #[error("Invalid corpus path: {0}")]
    InvalidCorpusPath(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Storage adapter error
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type for corpus operations
pub type CdmResult<T> = Result<T, CdmError>;
