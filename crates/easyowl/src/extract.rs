//! Single-pass extraction of entities and relations from the element tree.
//!
//! Child elements of a class declaration are routed through a dispatch
//! table keyed by local name ([`ChildKind::of`]). Anything the table does not
//! recognize becomes a generic annotation property, so unknown annotation
//! vocabularies still surface on the entity.

use std::collections::BTreeMap;

use tracing::debug;

use crate::document::XmlElement;
use crate::entity::{Entity, EntityMap, MatchType, Restriction, SynonymType};
use crate::relation::Relation;

/// Attributes that may carry an element's own identifier, in priority order.
const IDENTIFIER_ATTRIBUTES: [&str; 3] = ["about", "IRI", "ID"];

/// Class-expression elements that are structure rather than annotation.
const STRUCTURAL_ELEMENTS: [&str; 7] = [
    "equivalentClass",
    "intersectionOf",
    "unionOf",
    "complementOf",
    "Restriction",
    "Class",
    "Description",
];

/// What to do with a direct child of a class declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChildKind {
    SubClassOf,
    DisjointWith,
    Synonym(SynonymType),
    Match(MatchType),
    Structural,
    Property,
}

impl ChildKind {
    fn of(local_name: &str) -> Self {
        match local_name {
            "subClassOf" => Self::SubClassOf,
            "disjointWith" => Self::DisjointWith,
            name => {
                if let Some(kind) = SynonymType::from_local_name(name) {
                    Self::Synonym(kind)
                } else if let Some(kind) = MatchType::from_local_name(name) {
                    Self::Match(kind)
                } else if STRUCTURAL_ELEMENTS.contains(&name) {
                    Self::Structural
                } else {
                    Self::Property
                }
            }
        }
    }
}

/// Counters describing one extraction pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    /// Class declarations seen (including skipped ones).
    pub declarations: usize,
    /// Declarations skipped for lacking an identifier.
    pub skipped: usize,
    /// Declarations merged into an earlier one with the same identifier.
    pub merged: usize,
}

/// Extracts every top-level class declaration under `root`.
pub fn extract_entities(root: &XmlElement) -> (EntityMap, ExtractionStats) {
    let mut entities = EntityMap::new();
    let mut stats = ExtractionStats::default();

    for declaration in root.children_named("Class") {
        stats.declarations += 1;
        let Some(id) = identifier_of(declaration) else {
            stats.skipped += 1;
            debug!(element = %declaration, "skipping class declaration without identifier");
            continue;
        };

        if !entities.insert(extract_entity(id, declaration)) {
            stats.merged += 1;
            debug!(entity = id, "merged re-declared entity");
        }
    }

    (entities, stats)
}

/// Extracts every top-level object property declaration under `root`.
pub fn extract_relations(root: &XmlElement) -> Vec<Relation> {
    root.children_named("ObjectProperty")
        .filter_map(|declaration| {
            let predicate = identifier_of(declaration)?;
            let mut properties = BTreeMap::new();
            for child in declaration.children() {
                if let Some(text) = child.text() {
                    properties.insert(child.local_name().to_string(), text.to_string());
                }
            }
            Some(Relation {
                predicate: predicate.to_string(),
                domain: resource_of_child(declaration, "domain"),
                range: resource_of_child(declaration, "range"),
                properties,
            })
        })
        .collect()
}

fn extract_entity(id: &str, declaration: &XmlElement) -> Entity {
    let mut entity = Entity::new(id);

    for child in declaration.children() {
        match ChildKind::of(child.local_name()) {
            ChildKind::SubClassOf => extract_superclass(&mut entity, child),
            ChildKind::DisjointWith => {
                if let Some(target) = reference_of(child) {
                    entity.disjoints.insert(target.to_string());
                }
            }
            ChildKind::Synonym(kind) => {
                if let Some(text) = child.text() {
                    entity.add_synonym(kind, text);
                }
            }
            ChildKind::Match(kind) => {
                if let Some(target) = child.non_empty_attribute("resource").or(child.text()) {
                    entity.add_match(kind, target);
                }
            }
            ChildKind::Structural => {}
            ChildKind::Property => {
                if let Some(value) = child.text().or(child.non_empty_attribute("resource")) {
                    entity
                        .properties
                        .insert(child.local_name().to_string(), value.to_string());
                }
            }
        }
    }

    entity
}

/// Handles one `subClassOf` element: a named parent, or a class expression.
fn extract_superclass(entity: &mut Entity, element: &XmlElement) {
    if let Some(parent) = reference_of(element) {
        entity.add_parent(parent);
        return;
    }

    for expression in element.children() {
        collect_restrictions(entity, expression);
    }
}

fn collect_restrictions(entity: &mut Entity, expression: &XmlElement) {
    match expression.local_name() {
        "Restriction" => entity.add_restriction(Restriction {
            on_property: resource_of_child(expression, "onProperty"),
            some_values_from: resource_of_child(expression, "someValuesFrom"),
        }),
        "Class" | "Description" => {
            for part in expression.children_named("intersectionOf") {
                for item in part.children() {
                    collect_restrictions(entity, item);
                }
            }
        }
        "intersectionOf" => {
            for item in expression.children() {
                collect_restrictions(entity, item);
            }
        }
        _ => {}
    }
}

/// The element's own identifier attribute.
fn identifier_of(element: &XmlElement) -> Option<&str> {
    IDENTIFIER_ATTRIBUTES
        .iter()
        .find_map(|name| element.non_empty_attribute(name))
}

/// A reference to a named class: `resource`, or a nested `<Class about=...>`.
fn reference_of(element: &XmlElement) -> Option<&str> {
    element.non_empty_attribute("resource").or_else(|| {
        let nested = element.child("Class")?;
        if nested.children().is_empty() {
            identifier_of(nested)
        } else {
            None
        }
    })
}

fn resource_of_child(element: &XmlElement, local_name: &str) -> Option<String> {
    element
        .child(local_name)
        .and_then(|child| child.non_empty_attribute("resource"))
        .map(str::to_string)
}
