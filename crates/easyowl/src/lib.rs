//! # easyowl
//!
//! Lightweight, tolerant parsing of OWL ontology files.
//!
//! This crate turns an OWL/RDF-XML document, or one of the loosely
//! structured OBO-derived XML exports, into a flat [`EntityMap`]: one
//! [`Entity`] per declared class with its annotation properties, synonyms,
//! SKOS matches, direct superclasses and disjoint classes.
//!
//! No description-logic reasoning happens here. The document is treated as
//! labeled XML elements and flattened into records.
//!
//! ## Usage
//!
//! ```rust
//! use easyowl::{Ontology, SynonymType};
//!
//! let owl = r#"
//! <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
//!          xmlns:rdfs="http://www.w3.org/2000/01/rdf-schema#"
//!          xmlns:owl="http://www.w3.org/2002/07/owl#"
//!          xmlns:oboInOwl="http://www.geneontology.org/formats/oboInOwl#">
//!   <owl:Class rdf:about="http://example.org/A">
//!     <rdfs:label>Heart Disease</rdfs:label>
//!     <rdfs:subClassOf rdf:resource="http://example.org/B"/>
//!     <oboInOwl:hasExactSynonym>cardiopathy</oboInOwl:hasExactSynonym>
//!   </owl:Class>
//! </rdf:RDF>"#;
//!
//! let ontology = Ontology::parse_str(owl).unwrap();
//! let entity = &ontology.entities["http://example.org/A"];
//! assert_eq!(entity.label(), Some("Heart Disease"));
//! assert_eq!(entity.subclasses, vec!["http://example.org/B"]);
//! assert_eq!(entity.synonyms_of(SynonymType::Exact), ["cardiopathy"]);
//! ```
//!
//! ## Recognized Elements
//!
//! Elements are matched on their local name, whatever their prefix.
//!
//! | Local name | Destination |
//! |------------|-------------|
//! | `Class` (top level) | one [`Entity`] |
//! | `ObjectProperty` (top level) | one [`Relation`] |
//! | `subClassOf` | `subclasses`, or `restrictions` for class expressions |
//! | `disjointWith` | `disjoints` |
//! | `hasExactSynonym` / `hasNarrowSynonym` / `hasBroadSynonym` | `synonyms` |
//! | `exactMatch` / `closeMatch` / `narrowMatch` / `broadMatch` | `matches` |
//! | anything else | `properties` |

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod document;
mod entity;
mod error;
mod extract;
mod ontology;
mod relation;

pub use document::{XmlAttribute, XmlDocument, XmlElement};
pub use entity::{Entity, EntityMap, MatchType, Restriction, SynonymType, LABEL_PROPERTY};
pub use error::{OntologyParseError, ParseResult};
pub use extract::{extract_entities, extract_relations, ExtractionStats};
pub use ontology::Ontology;
pub use relation::Relation;
