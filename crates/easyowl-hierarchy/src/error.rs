//! Error types for hierarchy queries.

use thiserror::Error;

/// An identifier passed to a hierarchy query is not a declared entity.
///
/// Identifiers that only appear as dangling `subClassOf` targets are not
/// declared entities and also produce this error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Entity not found: {entity_id}")]
pub struct EntityNotFoundError {
    /// The identifier that was looked up.
    pub entity_id: String,
}

impl EntityNotFoundError {
    /// Creates the error for `entity_id`.
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
        }
    }
}

/// Result type for hierarchy queries.
pub type HierarchyResult<T> = std::result::Result<T, EntityNotFoundError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_entity_not_found() {
        let err = EntityNotFoundError::new("http://purl.obolibrary.org/obo/HP_9999999");
        assert_eq!(
            err.to_string(),
            "Entity not found: http://purl.obolibrary.org/obo/HP_9999999"
        );
        assert_eq!(err.entity_id, "http://purl.obolibrary.org/obo/HP_9999999");
    }
}
