//! Error types for ontology parsing.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading an ontology document.
///
/// Every variant is fatal: a document that fails here never produces a
/// partially usable [`Ontology`](crate::Ontology).
#[derive(Error, Debug)]
pub enum OntologyParseError {
    /// The source file could not be opened or read.
    #[error("failed to read ontology file {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The path exists but does not point to a regular file.
    #[error("path is not a file: {0}")]
    NotAFile(PathBuf),

    /// The bytes are not well-formed XML.
    #[error("invalid XML at byte {position}: {message}")]
    Xml {
        /// Byte offset reported by the XML reader.
        position: u64,
        /// Description of the error.
        message: String,
    },

    /// The document contains no root element.
    #[error("document has no root element")]
    NoRootElement,

    /// The document ended while an element was still open.
    #[error("document ended inside element <{0}>")]
    UnclosedElement(String),

    /// The document declares no classes at all.
    #[error("no entity declarations found in ontology document")]
    NoEntities,
}

impl OntologyParseError {
    /// Creates an I/O error with path context.
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for ontology parsing operations.
pub type ParseResult<T> = std::result::Result<T, OntologyParseError>;
