//! The parsed ontology and its load entry points.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::{info, warn};

use crate::document::XmlDocument;
use crate::entity::EntityMap;
use crate::error::{OntologyParseError, ParseResult};
use crate::extract::{extract_entities, extract_relations, ExtractionStats};
use crate::relation::Relation;

const RDF_NAMESPACE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

/// Everything extracted from one ontology document.
#[derive(Debug, Clone)]
pub struct Ontology {
    /// Declared classes keyed by IRI.
    pub entities: EntityMap,
    /// Declared object properties.
    pub relations: Vec<Relation>,
    /// Prefixed namespaces declared on the root element.
    pub namespaces: BTreeMap<String, String>,
    /// Counters from the extraction pass.
    pub stats: ExtractionStats,
}

impl Ontology {
    /// Loads an ontology from a file.
    ///
    /// The file handle is released before this returns, on success or error.
    ///
    /// # Errors
    ///
    /// Returns [`OntologyParseError`] if the path is missing or not a file,
    /// the content is not well-formed XML, or no class is declared.
    pub fn from_path(path: impl AsRef<Path>) -> ParseResult<Self> {
        let path = path.as_ref();
        let metadata =
            std::fs::metadata(path).map_err(|e| OntologyParseError::io_error(path, e))?;
        if !metadata.is_file() {
            return Err(OntologyParseError::NotAFile(path.to_path_buf()));
        }

        let file = File::open(path).map_err(|e| OntologyParseError::io_error(path, e))?;
        let document = XmlDocument::from_reader(BufReader::new(file))?;
        Self::from_document(&document, &path.display().to_string())
    }

    /// Loads an ontology from any byte stream.
    pub fn from_reader<R: Read>(source: R) -> ParseResult<Self> {
        let document = XmlDocument::from_reader(BufReader::new(source))?;
        Self::from_document(&document, "<reader>")
    }

    /// Loads an ontology from an in-memory document.
    pub fn parse_str(content: &str) -> ParseResult<Self> {
        let document = XmlDocument::parse_str(content)?;
        Self::from_document(&document, "<string>")
    }

    /// Extracts an ontology from an already loaded document.
    ///
    /// `source` is only used for log output.
    pub fn from_document(document: &XmlDocument, source: &str) -> ParseResult<Self> {
        let namespaces = document.namespaces().clone();
        if namespaces.is_empty() {
            warn!(source, "ontology document declares no namespace prefixes");
        } else if !namespaces.values().any(|uri| uri == RDF_NAMESPACE) {
            warn!(source, "ontology document does not declare the RDF namespace");
        }

        let root = document.root();
        let (entities, stats) = extract_entities(root);
        if entities.is_empty() {
            return Err(OntologyParseError::NoEntities);
        }
        let relations = extract_relations(root);

        info!(
            source,
            entities = entities.len(),
            relations = relations.len(),
            skipped = stats.skipped,
            merged = stats.merged,
            "parsed ontology"
        );

        Ok(Self {
            entities,
            relations,
            namespaces,
            stats,
        })
    }
}
