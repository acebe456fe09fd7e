//! Integration tests for hierarchy traversal over parsed ontologies.
//!
//! Checks the traversal guarantees (depth monotonicity, exact inverse
//! indexes, cycle safety) against every entity of a small real-shaped
//! ontology rather than hand-picked nodes.

use easyowl::Ontology;
use easyowl_hierarchy::{HierarchyIndex, HierarchySource, HierarchyTraverser, TraversalDepth};
use std::collections::HashSet;

/// Hierarchy with a diamond, a cycle and a dangling parent:
/// ```text
///            disease
///           /       \
///   cardiovascular  inflammatory
///           \       /       \
///          myocarditis    loopA <-> loopB
///               |
///        viral_myocarditis --> (imported, undeclared)
/// ```
const ONTOLOGY: &str = r#"<rdf:RDF
    xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
    xmlns:rdfs="http://www.w3.org/2000/01/rdf-schema#"
    xmlns:owl="http://www.w3.org/2002/07/owl#">
  <owl:Class rdf:about="disease"/>
  <owl:Class rdf:about="cardiovascular">
    <rdfs:subClassOf rdf:resource="disease"/>
  </owl:Class>
  <owl:Class rdf:about="inflammatory">
    <rdfs:subClassOf rdf:resource="disease"/>
  </owl:Class>
  <owl:Class rdf:about="myocarditis">
    <rdfs:subClassOf rdf:resource="cardiovascular"/>
    <rdfs:subClassOf rdf:resource="inflammatory"/>
  </owl:Class>
  <owl:Class rdf:about="viral_myocarditis">
    <rdfs:subClassOf rdf:resource="myocarditis"/>
    <rdfs:subClassOf rdf:resource="imported"/>
  </owl:Class>
  <owl:Class rdf:about="loopA">
    <rdfs:subClassOf rdf:resource="inflammatory"/>
    <rdfs:subClassOf rdf:resource="loopB"/>
  </owl:Class>
  <owl:Class rdf:about="loopB">
    <rdfs:subClassOf rdf:resource="loopA"/>
  </owl:Class>
</rdf:RDF>"#;

fn load() -> Ontology {
    Ontology::parse_str(ONTOLOGY).expect("test ontology parses")
}

#[test]
fn test_depth_zero_is_self_for_every_entity() {
    let ontology = load();
    let index = HierarchyIndex::build(&ontology.entities);
    let traverser = HierarchyTraverser::new(&index);

    for id in ontology.entities.ids() {
        assert_eq!(
            traverser.get_ancestors(id, TraversalDepth::Limited(0)).unwrap(),
            vec![id]
        );
        assert_eq!(
            traverser.get_descendants(id, TraversalDepth::Limited(0)).unwrap(),
            vec![id]
        );
    }
}

#[test]
fn test_unbounded_results_have_no_duplicates() {
    let ontology = load();
    let index = HierarchyIndex::build(&ontology.entities);
    let traverser = HierarchyTraverser::new(&index);

    for id in ontology.entities.ids() {
        for result in [
            traverser.get_ancestors(id, TraversalDepth::Unbounded).unwrap(),
            traverser.get_descendants(id, TraversalDepth::Unbounded).unwrap(),
        ] {
            let unique: HashSet<&str> = result.iter().copied().collect();
            assert_eq!(unique.len(), result.len(), "duplicates for {id}");
            assert_eq!(result[0], id);
        }
    }
}

#[test]
fn test_depth_is_monotonic() {
    let ontology = load();
    let index = HierarchyIndex::build(&ontology.entities);
    let traverser = HierarchyTraverser::new(&index);

    for id in ontology.entities.ids() {
        let mut previous: HashSet<&str> = HashSet::new();
        for depth in 0..6 {
            let current: HashSet<&str> = traverser
                .get_ancestors(id, TraversalDepth::Limited(depth))
                .unwrap()
                .into_iter()
                .collect();
            assert!(previous.is_subset(&current), "{id} shrank at depth {depth}");
            previous = current;
        }
        let unbounded: HashSet<&str> = traverser
            .get_ancestors(id, TraversalDepth::Unbounded)
            .unwrap()
            .into_iter()
            .collect();
        assert!(previous.is_subset(&unbounded));
    }
}

#[test]
fn test_direct_parents_appear_at_depth_one_both_ways() {
    let ontology = load();
    let index = HierarchyIndex::build(&ontology.entities);
    let traverser = HierarchyTraverser::new(&index);

    for entity in &ontology.entities {
        let up = traverser
            .get_ancestors(&entity.id, TraversalDepth::Limited(1))
            .unwrap();
        for parent in &entity.subclasses {
            assert!(up.contains(&parent.as_str()));
            if index.declared_index(parent).is_some() {
                let down = traverser
                    .get_descendants(parent, TraversalDepth::Limited(1))
                    .unwrap();
                assert!(down.contains(&entity.id.as_str()));
            }
        }
    }
}

#[test]
fn test_diamond_and_dangling() {
    let ontology = load();
    let index = HierarchyIndex::build(&ontology.entities);
    let traverser = HierarchyTraverser::new(&index);

    let ancestors = traverser
        .get_ancestors("viral_myocarditis", TraversalDepth::Unbounded)
        .unwrap();
    assert_eq!(
        ancestors,
        vec![
            "viral_myocarditis",
            "myocarditis",
            "imported",
            "cardiovascular",
            "inflammatory",
            "disease",
        ]
    );
    assert_eq!(index.dangling_ids().collect::<Vec<_>>(), vec!["imported"]);
}

#[test]
fn test_cycle_reachable_from_root() {
    let ontology = load();
    let index = HierarchyIndex::build(&ontology.entities);
    let traverser = HierarchyTraverser::new(&index);

    let descendants = traverser
        .get_descendants("disease", TraversalDepth::Unbounded)
        .unwrap();
    assert_eq!(
        descendants,
        vec![
            "disease",
            "cardiovascular",
            "inflammatory",
            "myocarditis",
            "loopA",
            "viral_myocarditis",
            "loopB",
        ]
    );

    let loop_ancestors = traverser
        .get_ancestors("loopB", TraversalDepth::Unbounded)
        .unwrap();
    assert_eq!(loop_ancestors, vec!["loopB", "loopA", "inflammatory", "disease"]);
}

#[test]
fn test_unknown_identifier_carries_id() {
    let ontology = load();
    let index = HierarchyIndex::build(&ontology.entities);
    let traverser = HierarchyTraverser::new(&index);

    let err = traverser
        .get_ancestors("nonexistent", TraversalDepth::Unbounded)
        .unwrap_err();
    assert_eq!(err.entity_id, "nonexistent");
    assert_eq!(err.to_string(), "Entity not found: nonexistent");
}
