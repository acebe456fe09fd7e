//! # easyowl-reader
//!
//! One-stop reader for XML ontologies (OWL/RDF-XML and OBO-derived exports).
//!
//! [`OntologyParser`] loads a document with [`easyowl`], indexes its class
//! hierarchy with [`easyowl_hierarchy`], and answers three kinds of query:
//! direct entity lookup, ancestor/descendant traversal, and approximate
//! lookup of entities by label similarity.
//!
//! ## Key Features
//!
//! - **Tolerant parsing** - Elements are matched by local name, whatever the prefix
//! - **Cycle-safe traversal** - Breadth-first walks with an optional depth bound
//! - **TF-IDF similarity** - Labels and synonyms ranked by cosine similarity
//! - **Configurable caching** - LRU cache for repeated similarity queries
//! - **Optional parallelism** - Enable `parallel` feature for multi-threaded scoring
//!
//! ## Quick Start
//!
//! ```ignore
//! use easyowl_reader::OntologyParser;
//!
//! let parser = OntologyParser::from_path("doid.owl")?;
//!
//! let heart_disease = &parser.entities()["http://purl.obolibrary.org/obo/DOID_114"];
//! println!("{:?}", heart_disease.label());
//!
//! let lineage = parser.get_ancestors(&heart_disease.id, -1)?;
//! let matches = parser.find_similar_terms("cardiac disease", Some(5), Some(0.3));
//! ```
//!
//! ## With Configuration
//!
//! ```ignore
//! use easyowl::SynonymType;
//! use easyowl_reader::{CacheConfig, OntologyParser, ParserConfig, SimilarityConfig};
//! use std::time::Duration;
//!
//! let config = ParserConfig::builder()
//!     .with_similarity(SimilarityConfig::default().with_synonym_kinds([SynonymType::Exact]))
//!     .with_cache(CacheConfig {
//!         max_entries: 10_000,
//!         ttl: Duration::from_secs(600),
//!     })
//!     .with_parallel(true)
//!     .build();
//!
//! let parser = OntologyParser::from_path_with_config("hp.owl", config)?;
//! ```
//!
//! ## Query Semantics
//!
//! | Query | Depth / limits | Result |
//! |-------|----------------|--------|
//! | `get_ancestors(id, 0)` | none | `[id]` |
//! | `get_ancestors(id, k)` | `k` hops | `id` then parents breadth-first |
//! | `get_descendants(id, -1)` | unbounded | `id` then children breadth-first |
//! | `find_similar_terms(q, n, t)` | filter by `t`, then keep `n` | best match per entity |
//! | unknown `id` | - | [`EntityNotFoundError`] |
//!
//! ## Feature Flags
//!
//! - `parallel` - Scores similarity candidates with rayon
//! - `serde` - Serialize/deserialize model types and results
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       easyowl-reader                          │
//! │                                                               │
//! │  OntologyParser                                               │
//! │  ├── load XML → Ontology (easyowl)                            │
//! │  ├── HierarchyIndex, built eagerly (easyowl-hierarchy)        │
//! │  ├── SimilarityIndex, built on first similarity query         │
//! │  └── QueryCache (optional LRU of ranked results)              │
//! │                                                               │
//! │  Dependencies:                                                │
//! │  ├── easyowl           - XML tree, entity extraction          │
//! │  └── easyowl-hierarchy - adjacency index, BFS traversal       │
//! └──────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod cache;
mod config;
mod error;
mod reader;
pub mod similarity;

// Public re-exports
pub use cache::{normalize_query, similarity_cache_key, CacheStats, QueryCache};
pub use config::{CacheConfig, ParserConfig, ParserConfigBuilder, SimilarityConfig};
pub use error::{EasyOwlError, EasyOwlResult};
pub use reader::{EntityRelations, OntologyParser};
pub use similarity::{SimilarMatch, SimilarityIndex};

// Re-export commonly used types from dependencies for convenience
pub use easyowl::{Entity, EntityMap, MatchType, OntologyParseError, Relation, SynonymType};
pub use easyowl_hierarchy::{EntityNotFoundError, TraversalDepth};
