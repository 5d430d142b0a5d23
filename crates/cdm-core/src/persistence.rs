//! CDM JSON persistence shapes
//!
//! These types mirror the on-disk layout of `*.manifest.cdm.json` and entity
//! `*.cdm.json` documents. They are produced from the corpus arena when saving
//! and can be parsed back for inspection.

use serde::{Deserialize, Serialize};

use crate::corpus::Corpus;
use crate::domain::document::ImportReference;
use crate::domain::trait_reference::TraitReference;
use crate::error::CdmResult;
use crate::types::{CopyOptions, DataFormat, DocumentId, EntityId, ManifestId};
use crate::JSON_SCHEMA_SEMANTIC_VERSION;

/// Declaration type written for entities defined in this corpus
pub const LOCAL_ENTITY_TYPE: &str = "LocalEntity";

/// Persisted manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestContent {
    /// Logical manifest name
    pub manifest_name: String,
    /// Schema version of the document format
    pub json_schema_semantic_version: String,
    /// Schema imports
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<ImportReference>,
    /// Entity declarations
    #[serde(default)]
    pub entities: Vec<EntityDeclarationContent>,
}

/// Persisted entity declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityDeclarationContent {
    /// Declaration type, `LocalEntity`
    #[serde(rename = "type")]
    pub kind: String,
    /// Entity name
    pub entity_name: String,
    /// `<document>/<entity>` path of the definition
    pub entity_path: String,
}

/// Persisted entity document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentContent {
    /// Schema version of the document format
    pub json_schema_semantic_version: String,
    /// Schema imports
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<ImportReference>,
    /// Entity definitions
    #[serde(default)]
    pub definitions: Vec<EntityContent>,
}

/// Persisted entity definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityContent {
    /// Entity name
    pub entity_name: String,
    /// Traits exhibited by the entity
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exhibits_traits: Vec<TraitReferenceContent>,
    /// Attributes in declaration order
    #[serde(default)]
    pub has_attributes: Vec<AttributeContent>,
}

/// Persisted type attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeContent {
    /// Attribute name
    pub name: String,
    /// Scalar representation
    #[serde(default, skip_serializing_if = "DataFormat::is_unknown")]
    pub data_format: DataFormat,
    /// Applied traits
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub applied_traits: Vec<TraitReferenceContent>,
}

/// Persisted trait reference: a bare name under `string_refs`, an object otherwise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TraitReferenceContent {
    /// `"is.sensitive"`
    Name(String),
    /// `{"traitReference": "is.sensitive"}`
    Reference {
        /// Referenced trait name
        #[serde(rename = "traitReference")]
        trait_reference: String,
    },
}

impl TraitReferenceContent {
    /// Referenced trait name, whatever the shape
    pub fn name(&self) -> &str {
        match self {
            TraitReferenceContent::Name(name) => name,
            TraitReferenceContent::Reference { trait_reference } => trait_reference,
        }
    }

    fn from_reference(reference: &TraitReference, options: &CopyOptions) -> Self {
        if options.string_refs && reference.simple_named_reference {
            TraitReferenceContent::Name(reference.named_reference.clone())
        } else {
            TraitReferenceContent::Reference {
                trait_reference: reference.named_reference.clone(),
            }
        }
    }
}

/// Build the persisted form of a manifest
pub fn manifest_content(
    corpus: &Corpus,
    manifest: ManifestId,
    manifest_name: &str,
) -> CdmResult<ManifestContent> {
    let definition = corpus.manifest(manifest)?;

    Ok(ManifestContent {
        manifest_name: manifest_name.to_string(),
        json_schema_semantic_version: JSON_SCHEMA_SEMANTIC_VERSION.to_string(),
        imports: definition.imports.clone(),
        entities: definition
            .entities
            .iter()
            .map(|d| EntityDeclarationContent {
                kind: LOCAL_ENTITY_TYPE.to_string(),
                entity_name: d.entity_name.clone(),
                entity_path: d.entity_path.clone(),
            })
            .collect(),
    })
}

/// Build the persisted form of a document
pub fn document_content(
    corpus: &Corpus,
    document: DocumentId,
    options: &CopyOptions,
) -> CdmResult<DocumentContent> {
    let definition = corpus.document(document)?;
    let definitions = definition
        .definitions
        .iter()
        .map(|entity| entity_content(corpus, *entity, options))
        .collect::<CdmResult<Vec<_>>>()?;

    Ok(DocumentContent {
        json_schema_semantic_version: JSON_SCHEMA_SEMANTIC_VERSION.to_string(),
        imports: definition.imports.clone(),
        definitions,
    })
}

fn entity_content(corpus: &Corpus, entity: EntityId, options: &CopyOptions) -> CdmResult<EntityContent> {
    let definition = corpus.entity(entity)?;

    let has_attributes = definition
        .attributes
        .iter()
        .map(|id| -> CdmResult<AttributeContent> {
            let attribute = corpus.attribute(*id)?;
            Ok(AttributeContent {
                name: attribute.name.clone(),
                data_format: attribute.data_format,
                applied_traits: attribute
                    .applied_traits
                    .iter()
                    .map(|t| TraitReferenceContent::from_reference(t, options))
                    .collect(),
            })
        })
        .collect::<CdmResult<Vec<_>>>()?;

    Ok(EntityContent {
        entity_name: definition.entity_name.clone(),
        exhibits_traits: definition
            .exhibits_traits
            .iter()
            .map(|t| TraitReferenceContent::from_reference(t, options))
            .collect(),
        has_attributes,
    })
}
