//! # easyowl-hierarchy
//!
//! Hierarchy index and traversal engine for ontologies parsed by
//! [`easyowl`].
//!
//! [`HierarchyIndex`] inverts every entity's `subclasses` into a forward
//! (child → parents) and reverse (parent → children) adjacency over an
//! arena of identifiers. [`HierarchyTraverser`] walks either direction
//! breadth-first with an optional depth bound.
//!
//! ## Quick Start
//!
//! ```rust
//! use easyowl::Ontology;
//! use easyowl_hierarchy::{HierarchyIndex, HierarchyTraverser, TraversalDepth};
//!
//! let ontology = Ontology::parse_str(r#"
//!     <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
//!              xmlns:rdfs="http://www.w3.org/2000/01/rdf-schema#"
//!              xmlns:owl="http://www.w3.org/2002/07/owl#">
//!       <owl:Class rdf:about="A"><rdfs:subClassOf rdf:resource="B"/></owl:Class>
//!       <owl:Class rdf:about="B"/>
//!     </rdf:RDF>"#).unwrap();
//!
//! let index = HierarchyIndex::build(&ontology.entities);
//! let traverser = HierarchyTraverser::new(&index);
//!
//! assert_eq!(traverser.get_ancestors("A", TraversalDepth::Unbounded).unwrap(), vec!["A", "B"]);
//! assert_eq!(traverser.get_descendants("B", TraversalDepth::from(-1)).unwrap(), vec!["B", "A"]);
//! ```
//!
//! ## Guarantees
//!
//! | Property | Holds |
//! |----------|-------|
//! | Depth 0 returns only the start entity | Yes |
//! | Terminates on cyclic hierarchies | Yes |
//! | No duplicates under diamond inheritance | Yes |
//! | Breadth-first, input-ordered results | Yes |
//! | Dangling parent references tolerated | Yes (dead ends) |

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod depth;
mod error;
mod index;
mod traits;
mod traverser;

// Public re-exports
pub use depth::TraversalDepth;
pub use error::{EntityNotFoundError, HierarchyResult};
pub use index::HierarchyIndex;
pub use traits::{HierarchySource, NodeIndex};
pub use traverser::HierarchyTraverser;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_api_accessible() {
        let _: Option<HierarchyIndex> = None;
        let _: Option<TraversalDepth> = None;
        let _: Option<HierarchyResult<()>> = None;
        let _: Option<EntityNotFoundError> = None;
    }
}
