//! Error types for the ontology reader.

use easyowl::OntologyParseError;
use easyowl_hierarchy::EntityNotFoundError;
use thiserror::Error;

/// Umbrella error for everything the reader can fail with.
///
/// Each operation returns its precise error type; convert into this one to
/// handle every library failure in a single place.
#[derive(Error, Debug)]
pub enum EasyOwlError {
    /// The ontology document could not be loaded.
    #[error("ontology parse error: {0}")]
    Parse(#[from] OntologyParseError),

    /// A query referenced an unknown entity.
    #[error(transparent)]
    EntityNotFound(#[from] EntityNotFoundError),
}

/// Result type for reader operations.
pub type EasyOwlResult<T> = std::result::Result<T, EasyOwlError>;
