use crate::domain::document::ImportReference;
use crate::types::EntityId;
use crate::MANIFEST_SUFFIX;

/// Declaration of an entity inside a manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDeclaration {
    /// Declared entity name
    pub entity_name: String,

    /// Location of the definition, `<document>/<entity>`
    pub entity_path: String,

    /// The declared entity
    pub entity: EntityId,
}

/// Top-level index of entity declarations
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestDefinition {
    /// File name, e.g. `default.manifest.cdm.json`
    pub name: String,

    /// Logical manifest name, e.g. `default`
    pub manifest_name: String,

    /// Schema imports, in order
    pub imports: Vec<ImportReference>,

    /// Declared entities, in order
    pub entities: Vec<EntityDeclaration>,
}

impl ManifestDefinition {
    /// New empty manifest stored as `name`
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            manifest_name: manifest_name_from_file(&name),
            name,
            imports: Vec::new(),
            entities: Vec::new(),
        }
    }

    /// Append an import without checking for duplicates
    pub fn push_import(&mut self, corpus_path: impl Into<String>) {
        self.imports.push(ImportReference::new(corpus_path));
    }

    /// Declare `entity` at `entity_path`
    pub fn push_entity(
        &mut self,
        entity: EntityId,
        entity_name: impl Into<String>,
        entity_path: impl Into<String>,
    ) -> &EntityDeclaration {
        self.entities.push(EntityDeclaration {
            entity_name: entity_name.into(),
            entity_path: entity_path.into(),
            entity,
        });
        &self.entities[self.entities.len() - 1]
    }

    /// Find a declaration by its entity path
    pub fn entity_declaration(&self, entity_path: &str) -> Option<&EntityDeclaration> {
        self.entities.iter().find(|d| d.entity_path == entity_path)
    }
}

/// Derive the logical manifest name from a file name.
///
/// `default.manifest.cdm.json` becomes `default`; names without the manifest
/// suffix are returned unchanged apart from a trailing `.cdm.json`.
pub fn manifest_name_from_file(file_name: &str) -> String {
    let base = file_name.rsplit('/').next().unwrap_or(file_name);
    base.strip_suffix(MANIFEST_SUFFIX)
        .or_else(|| base.strip_suffix(crate::CDM_DOCUMENT_SUFFIX))
        .unwrap_or(base)
        .to_string()
}
