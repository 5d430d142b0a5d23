use crate::domain::trait_reference::TraitReference;
use crate::types::{AttributeId, DataFormat};

/// Type attribute definition: a named, scalar-typed member of an entity
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAttributeDefinition {
    /// Attribute name
    pub name: String,

    /// Scalar representation
    pub data_format: DataFormat,

    /// Traits applied to this attribute, in application order. Duplicates are kept.
    pub applied_traits: Vec<TraitReference>,
}

impl TypeAttributeDefinition {
    /// New attribute with no format and no traits
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_format: DataFormat::Unknown,
            applied_traits: Vec::new(),
        }
    }

    /// Append a trait reference unconditionally
    pub fn apply_trait(&mut self, reference: TraitReference) -> &TraitReference {
        self.applied_traits.push(reference);
        &self.applied_traits[self.applied_traits.len() - 1]
    }

    /// Number of applied references naming `name`
    pub fn applied_trait_count(&self, name: &str) -> usize {
        self.applied_traits.iter().filter(|t| t.refers_to(name)).count()
    }
}

/// Result of adding an attribute to an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeItem {
    /// The attribute that was added
    pub attribute: AttributeId,

    /// Zero-based position within the entity's attribute list
    pub position: usize,
}
