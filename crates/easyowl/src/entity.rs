//! Entity model for parsed ontology classes.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::ops::Index;

/// Property key holding an entity's primary label.
pub const LABEL_PROPERTY: &str = "label";

/// Kinds of synonyms found in OBO/OWL ontologies (oboInOwl vocabulary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SynonymType {
    /// Fully interchangeable with the primary label.
    Exact,
    /// More specific than the primary label.
    Narrow,
    /// More general than the primary label.
    Broad,
}

impl SynonymType {
    /// All synonym kinds, in declaration order.
    pub const ALL: [SynonymType; 3] = [Self::Exact, Self::Narrow, Self::Broad];

    /// The element local name carrying this synonym kind.
    pub fn local_name(self) -> &'static str {
        match self {
            Self::Exact => "hasExactSynonym",
            Self::Narrow => "hasNarrowSynonym",
            Self::Broad => "hasBroadSynonym",
        }
    }

    /// Maps an element local name back to a synonym kind.
    pub fn from_local_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.local_name() == name)
    }
}

impl fmt::Display for SynonymType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Exact => "exact",
            Self::Narrow => "narrow",
            Self::Broad => "broad",
        })
    }
}

/// Kinds of SKOS mapping matches between ontology terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum MatchType {
    /// Terms are identical in meaning.
    ExactMatch,
    /// Terms are similar but not identical.
    CloseMatch,
    /// This term is more specific than the matched term.
    NarrowMatch,
    /// This term is more general than the matched term.
    BroadMatch,
}

impl MatchType {
    /// All match kinds, in declaration order.
    pub const ALL: [MatchType; 4] = [
        Self::ExactMatch,
        Self::CloseMatch,
        Self::NarrowMatch,
        Self::BroadMatch,
    ];

    /// The element local name carrying this match kind.
    pub fn local_name(self) -> &'static str {
        match self {
            Self::ExactMatch => "exactMatch",
            Self::CloseMatch => "closeMatch",
            Self::NarrowMatch => "narrowMatch",
            Self::BroadMatch => "broadMatch",
        }
    }

    /// Maps an element local name back to a match kind.
    pub fn from_local_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.local_name() == name)
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.local_name())
    }
}

/// An existential restriction found under `subClassOf`.
///
/// Either side may be missing when the source document is incomplete.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Restriction {
    /// The restricted property.
    pub on_property: Option<String>,
    /// The filler class.
    pub some_values_from: Option<String>,
}

/// A declared ontology class.
///
/// `subclasses` holds the identifiers this entity is a `subClassOf`, i.e.
/// its direct **parents**. The name follows the source vocabulary and is kept
/// for compatibility with existing callers; see [`Entity::parents`].
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    /// The class IRI.
    pub id: String,
    /// Annotation properties keyed by local name (label, definition, ...).
    pub properties: BTreeMap<String, String>,
    /// Direct superclass identifiers, in declaration order.
    pub subclasses: Vec<String>,
    /// Classes declared disjoint with this one.
    pub disjoints: BTreeSet<String>,
    /// Synonym strings per kind.
    pub synonyms: BTreeMap<SynonymType, Vec<String>>,
    /// External identifiers per match kind.
    pub matches: BTreeMap<MatchType, Vec<String>>,
    /// Anonymous restrictions from `subClassOf` class expressions.
    pub restrictions: Vec<Restriction>,
}

impl Entity {
    /// Creates an entity with no fields besides its identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// The `label` property, if present.
    pub fn label(&self) -> Option<&str> {
        self.property(LABEL_PROPERTY)
    }

    /// Looks up an annotation property by local name.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// Direct parents. Alias for `subclasses`.
    pub fn parents(&self) -> &[String] {
        &self.subclasses
    }

    /// Synonyms of one kind (empty if none were declared).
    pub fn synonyms_of(&self, kind: SynonymType) -> &[String] {
        self.synonyms.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }

    /// Match identifiers of one kind (empty if none were declared).
    pub fn matches_of(&self, kind: MatchType) -> &[String] {
        self.matches.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }

    pub(crate) fn add_parent(&mut self, parent: &str) {
        push_unique(&mut self.subclasses, parent);
    }

    pub(crate) fn add_synonym(&mut self, kind: SynonymType, value: &str) {
        push_unique(self.synonyms.entry(kind).or_default(), value);
    }

    pub(crate) fn add_match(&mut self, kind: MatchType, value: &str) {
        push_unique(self.matches.entry(kind).or_default(), value);
    }

    pub(crate) fn add_restriction(&mut self, restriction: Restriction) {
        if !self.restrictions.contains(&restriction) {
            self.restrictions.push(restriction);
        }
    }

    /// Merges a re-declaration of the same identifier into this entity.
    ///
    /// Properties from `other` overwrite existing values; every list field
    /// is appended without duplicates.
    pub fn merge(&mut self, other: Entity) {
        self.properties.extend(other.properties);
        for parent in &other.subclasses {
            self.add_parent(parent);
        }
        self.disjoints.extend(other.disjoints);
        for (kind, values) in &other.synonyms {
            for value in values {
                self.add_synonym(*kind, value);
            }
        }
        for (kind, values) in &other.matches {
            for value in values {
                self.add_match(*kind, value);
            }
        }
        for restriction in other.restrictions {
            self.add_restriction(restriction);
        }
    }
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}

/// Entities keyed by identifier, kept in first-declaration order.
///
/// Positions are stable: the n-th distinct identifier inserted is always at
/// position n, which downstream indexes use as an arena index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityMap {
    entities: Vec<Entity>,
    positions: HashMap<String, usize>,
}

impl EntityMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entity, merging it into an existing one with the same id.
    ///
    /// Returns `true` if the identifier was new.
    pub fn insert(&mut self, entity: Entity) -> bool {
        match self.positions.get(&entity.id) {
            Some(&position) => {
                self.entities[position].merge(entity);
                false
            }
            None => {
                self.positions.insert(entity.id.clone(), self.entities.len());
                self.entities.push(entity);
                true
            }
        }
    }

    /// Looks up an entity by identifier.
    pub fn get(&self, id: &str) -> Option<&Entity> {
        self.position(id).map(|p| &self.entities[p])
    }

    /// Returns `true` if the identifier is declared.
    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    /// Arena position of an identifier.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Entity at an arena position.
    pub fn get_by_position(&self, position: usize) -> Option<&Entity> {
        self.entities.get(position)
    }

    /// Number of distinct identifiers.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` if no entity has been inserted.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterates entities in first-declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.entities.iter()
    }

    /// Iterates identifiers in first-declaration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.entities.iter().map(|e| e.id.as_str())
    }
}

impl Index<&str> for EntityMap {
    type Output = Entity;

    fn index(&self, id: &str) -> &Entity {
        match self.get(id) {
            Some(entity) => entity,
            None => panic!("no entity with id {id}"),
        }
    }
}

impl<'a> IntoIterator for &'a EntityMap {
    type Item = &'a Entity;
    type IntoIter = std::slice::Iter<'a, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Entity> for EntityMap {
    fn from_iter<I: IntoIterator<Item = Entity>>(iter: I) -> Self {
        let mut map = Self::new();
        for entity in iter {
            map.insert(entity);
        }
        map
    }
}
