//! CDM Storage
//!
//! Provides the storage boundary for the CDM manifest writer.
//! The StorageAdapter trait defines a contract for reading and writing
//! persisted CDM documents under a mounted namespace, and the TokenProvider
//! trait is the pull-based source of `Authorization` header values that
//! authenticated adapters consume.

use async_trait::async_trait;
use thiserror::Error;
use std::fmt::Debug;

/// Errors that can occur during storage adapter operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage backend error: {0}")]
    BackendError(#[from] anyhow::Error), // Catch-all for backend-specific issues

    #[error("Document not found at path: {0}")]
    NotFound(String),

    #[error("Adapter '{0}' is read-only")]
    ReadOnly(String),

    #[error("Unexpected HTTP status {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Invalid adapter path: {0}")]
    InvalidPath(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

/// Result type for StorageAdapter operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Supplies the `Authorization` header value for authenticated adapters.
///
/// Implementations return the full header value (e.g. `Bearer <token>`), or an
/// empty string when no token is available yet.
pub trait TokenProvider: Send + Sync + Debug {
    /// Current header value
    fn get_token(&self) -> String;
}

/// Trait defining the contract for storage adapter implementations
#[async_trait]
pub trait StorageAdapter: Send + Sync + Debug {
    /// Whether `read` is supported
    fn can_read(&self) -> bool;

    /// Whether `write` is supported
    fn can_write(&self) -> bool;

    /// Read the document stored at an adapter path
    async fn read(&self, path: &str) -> StorageResult<String>;

    /// Write (create or overwrite) the document at an adapter path
    async fn write(&self, path: &str, data: &str) -> StorageResult<()>;

    /// Check whether a document exists at an adapter path
    async fn exists(&self, path: &str) -> StorageResult<bool> {
        match self.read(path).await {
            Ok(_) => Ok(true),
            Err(StorageError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Convert to Any for downcasting
    fn as_any(&self) -> &dyn std::any::Any where Self: 'static;
}

/// Normalize an adapter path to the `/a/b.cdm.json` form.
///
/// Rejects empty paths and paths containing `..` segments.
pub fn normalize_path(path: &str) -> StorageResult<String> {
    let trimmed = path.trim();
    if trimmed.is_empty() || trimmed == "/" {
        return Err(StorageError::InvalidPath(path.to_string()));
    }
    if trimmed.split('/').any(|segment| segment == "..") {
        return Err(StorageError::InvalidPath(path.to_string()));
    }

    if trimmed.starts_with('/') {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("/{}", trimmed))
    }
}

// Re-export modules so they can be used from other crates
pub mod memory;
pub mod adls;
pub mod standards;

pub use adls::AdlsAdapter;
pub use memory::InMemoryAdapter;
pub use standards::StandardsAdapter;
