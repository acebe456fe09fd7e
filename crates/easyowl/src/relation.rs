//! Object property declarations.

use std::collections::BTreeMap;

/// A declared object property with its domain and range.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Relation {
    /// The property IRI.
    pub predicate: String,
    /// Domain class, if declared.
    pub domain: Option<String>,
    /// Range class, if declared.
    pub range: Option<String>,
    /// Annotation values keyed by local name.
    pub properties: BTreeMap<String, String>,
}

impl Relation {
    /// Returns `true` if `entity_id` is the domain, the range, or any
    /// annotation value of this relation.
    pub fn involves(&self, entity_id: &str) -> bool {
        self.domain.as_deref() == Some(entity_id)
            || self.range.as_deref() == Some(entity_id)
            || self.properties.values().any(|v| v == entity_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_involves() {
        let relation = Relation {
            predicate: "http://example.org/part_of".into(),
            domain: Some("A".into()),
            range: None,
            properties: [("inverseOf".to_string(), "C".to_string())].into(),
        };
        assert!(relation.involves("A"));
        assert!(relation.involves("C"));
        assert!(!relation.involves("B"));
    }
}
