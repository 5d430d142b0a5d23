use serde::{Deserialize, Serialize};

/// Reference to a named trait, exhibited by an entity or applied to an attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitReference {
    /// Name of the referenced trait, e.g. `is.sensitive`
    pub named_reference: String,

    /// The reference carries no arguments and can be written as its bare name
    pub simple_named_reference: bool,
}

impl TraitReference {
    /// A simple (argument-less) reference to `name`
    pub fn simple(name: impl Into<String>) -> Self {
        Self {
            named_reference: name.into(),
            simple_named_reference: true,
        }
    }

    /// Whether this reference points at the trait called `name`
    #[inline]
    pub fn refers_to(&self, name: &str) -> bool {
        self.named_reference == name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_reference() {
        let reference = TraitReference::simple("is.sensitive");
        assert!(reference.simple_named_reference);
        assert!(reference.refers_to("is.sensitive"));
        assert!(!reference.refers_to("is.required"));
    }
}
