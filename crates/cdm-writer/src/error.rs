//! Error types for the manifest writer

use cdm_core::CdmError;
use cdm_storage::StorageError;
use thiserror::Error;

/// Writer error types
#[derive(Error, Debug)]
pub enum WriterError {
    /// An object-model or save operation ran before `mount()`
    #[error("Corpus is not mounted; call mount() first")]
    NotMounted,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Object model error
    #[error("Object model error: {0}")]
    Core(#[from] CdmError),

    /// Storage adapter error
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Writer result type
pub type WriterResult<T> = Result<T, WriterError>;

impl From<serde_json::Error> for WriterError {
    fn from(err: serde_json::Error) -> Self {
        WriterError::Config(err.to_string())
    }
}
