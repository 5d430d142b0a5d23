use crate::domain::trait_reference::TraitReference;
use crate::types::AttributeId;

/// Entity definition: a named set of attributes plus the traits it exhibits
#[derive(Debug, Clone, PartialEq)]
pub struct EntityDefinition {
    /// Entity name
    pub entity_name: String,

    /// Attributes in declaration order
    pub attributes: Vec<AttributeId>,

    /// Traits asserted on the entity itself
    pub exhibits_traits: Vec<TraitReference>,
}

impl EntityDefinition {
    /// New entity with no attributes or traits
    pub fn new(entity_name: impl Into<String>) -> Self {
        Self {
            entity_name: entity_name.into(),
            attributes: Vec::new(),
            exhibits_traits: Vec::new(),
        }
    }

    /// Append an attribute and return its position
    pub fn push_attribute(&mut self, attribute: AttributeId) -> usize {
        self.attributes.push(attribute);
        self.attributes.len() - 1
    }

    /// Look up an exhibited trait by name
    pub fn exhibited_trait(&self, name: &str) -> Option<&TraitReference> {
        self.exhibits_traits.iter().find(|t| t.refers_to(name))
    }

    /// Append an exhibited trait without checking for an existing one
    pub fn push_exhibited_trait(&mut self, reference: TraitReference) {
        self.exhibits_traits.push(reference);
    }
}
