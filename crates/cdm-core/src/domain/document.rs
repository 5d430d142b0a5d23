use serde::{Deserialize, Serialize};

use crate::types::EntityId;

/// Import of another document by corpus path, e.g. `cdm:/foundations.cdm.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReference {
    /// Corpus path of the imported document
    pub corpus_path: String,
}

impl ImportReference {
    /// Import `corpus_path`
    pub fn new(corpus_path: impl Into<String>) -> Self {
        Self {
            corpus_path: corpus_path.into(),
        }
    }
}

/// A file-level container of entity definitions
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentDefinition {
    /// File name, e.g. `Customer.cdm.json`
    pub name: String,

    /// Whether the document exists to hold entity definitions
    pub is_entity_document: bool,

    /// Schema imports, in order
    pub imports: Vec<ImportReference>,

    /// Entities defined in this document
    pub definitions: Vec<EntityId>,
}

impl DocumentDefinition {
    /// New empty document
    pub fn new(name: impl Into<String>, is_entity_document: bool) -> Self {
        Self {
            name: name.into(),
            is_entity_document,
            imports: Vec::new(),
            definitions: Vec::new(),
        }
    }

    /// Append an import without checking for duplicates
    pub fn push_import(&mut self, corpus_path: impl Into<String>) {
        self.imports.push(ImportReference::new(corpus_path));
    }

    /// Whether `corpus_path` is already imported
    pub fn imports_path(&self, corpus_path: &str) -> bool {
        self.imports.iter().any(|i| i.corpus_path == corpus_path)
    }

    /// Whether `entity` is defined here
    pub fn defines(&self, entity: EntityId) -> bool {
        self.definitions.contains(&entity)
    }
}
