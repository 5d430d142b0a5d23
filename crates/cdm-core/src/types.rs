//! Core types
//!
//! Object handles, attribute data formats and persistence options.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_CORPUS_ID: AtomicU64 = AtomicU64::new(1);

/// Issue an identity for a new corpus. Handles carry it so that a handle
/// issued by one corpus never resolves in another.
pub(crate) fn next_corpus_id() -> u64 {
    NEXT_CORPUS_ID.fetch_add(1, Ordering::Relaxed)
}

macro_rules! object_handle {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name {
            pub(crate) corpus: u64,
            pub(crate) index: usize,
        }

        impl $name {
            pub(crate) fn new(corpus: u64, index: usize) -> Self {
                Self { corpus, index }
            }

            /// Position of the object in the corpus arena
            #[inline]
            pub fn index(&self) -> usize {
                self.index
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{} #{}", $label, self.index)
            }
        }
    };
}

object_handle!(
    /// Handle to a manifest owned by a corpus
    ManifestId,
    "manifest"
);
object_handle!(
    /// Handle to a document owned by a corpus
    DocumentId,
    "document"
);
object_handle!(
    /// Handle to an entity definition owned by a corpus
    EntityId,
    "entity"
);
object_handle!(
    /// Handle to a type attribute definition owned by a corpus
    AttributeId,
    "attribute"
);

/// Scalar representation of a type attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DataFormat {
    /// No format set
    #[default]
    Unknown,
    /// 16-bit integer
    Int16,
    /// 32-bit integer
    Int32,
    /// 64-bit integer
    Int64,
    /// Single precision float
    Float,
    /// Double precision float
    Double,
    /// GUID
    Guid,
    /// Text
    String,
    /// Single character
    Char,
    /// Single byte
    Byte,
    /// Binary blob
    Binary,
    /// Time of day
    Time,
    /// Calendar date
    Date,
    /// Date and time
    DateTime,
    /// Date and time with offset
    DateTimeOffset,
    /// Boolean
    Boolean,
    /// Decimal
    Decimal,
    /// JSON
    Json,
}

impl DataFormat {
    /// Whether no format has been set
    #[inline]
    pub fn is_unknown(&self) -> bool {
        matches!(self, DataFormat::Unknown)
    }
}

/// Options controlling how the object graph is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyOptions {
    /// Write simple object references as plain names instead of reference objects
    pub string_refs: bool,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self { string_refs: true }
    }
}
