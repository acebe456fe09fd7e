//! Hierarchy traversal.
//!
//! This module provides the `HierarchyTraverser` struct for walking class
//! hierarchies breadth-first, upward (ancestors) or downward (descendants).

use std::collections::VecDeque;

use crate::depth::TraversalDepth;
use crate::error::{EntityNotFoundError, HierarchyResult};
use crate::traits::{HierarchySource, NodeIndex};

/// Which adjacency a walk follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
}

/// Traverses ontology class hierarchies using BFS.
///
/// Results are in breadth-first discovery order and always start with the
/// requested entity itself. Every node is visited at most once, so diamond
/// inheritance and cycles in malformed source data neither duplicate results
/// nor prevent termination. The walk uses an explicit queue, never the call
/// stack, so deep hierarchies are fine too.
///
/// # Example
///
/// ```ignore
/// use easyowl_hierarchy::{HierarchyIndex, HierarchyTraverser, TraversalDepth};
///
/// let index = HierarchyIndex::build(&ontology.entities);
/// let traverser = HierarchyTraverser::new(&index);
///
/// let ancestors = traverser.get_ancestors(heart_disease, TraversalDepth::Unbounded)?;
/// let children = traverser.get_descendants(disease, TraversalDepth::Limited(1))?;
/// ```
pub struct HierarchyTraverser<'a> {
    source: &'a dyn HierarchySource,
}

impl<'a> HierarchyTraverser<'a> {
    /// Creates a new traverser over the given hierarchy.
    pub fn new(source: &'a dyn HierarchySource) -> Self {
        Self { source }
    }

    /// Gets `entity_id` and every node reachable through parent edges.
    ///
    /// Dangling parent references are included in the result but are dead
    /// ends: they have no parents of their own.
    ///
    /// # Errors
    ///
    /// Returns [`EntityNotFoundError`] if `entity_id` is not a declared entity.
    pub fn get_ancestors(
        &self,
        entity_id: &str,
        max_depth: TraversalDepth,
    ) -> HierarchyResult<Vec<&'a str>> {
        self.walk(entity_id, max_depth, Direction::Up)
    }

    /// Gets `entity_id` and every node reachable through child edges.
    ///
    /// # Errors
    ///
    /// Returns [`EntityNotFoundError`] if `entity_id` is not a declared entity.
    pub fn get_descendants(
        &self,
        entity_id: &str,
        max_depth: TraversalDepth,
    ) -> HierarchyResult<Vec<&'a str>> {
        self.walk(entity_id, max_depth, Direction::Down)
    }

    /// Gets the direct parents of an entity, without the entity itself.
    pub fn get_direct_parents(&self, entity_id: &str) -> HierarchyResult<Vec<&'a str>> {
        let node = self.start_node(entity_id)?;
        Ok(self.resolve(self.source.parents(node)))
    }

    /// Gets the direct children of an entity, without the entity itself.
    pub fn get_direct_children(&self, entity_id: &str) -> HierarchyResult<Vec<&'a str>> {
        let node = self.start_node(entity_id)?;
        Ok(self.resolve(self.source.children(node)))
    }

    /// Returns `true` if `ancestor_id` is reachable upward from `entity_id`.
    ///
    /// An entity is not its own ancestor unless a cycle leads back to it.
    pub fn is_ancestor_of(&self, ancestor_id: &str, entity_id: &str) -> HierarchyResult<bool> {
        let start = self.start_node(entity_id)?;
        let Some(target) = self.source.node_index(ancestor_id) else {
            return Ok(false);
        };

        let mut visited = vec![false; self.source.node_count()];
        let mut queue: VecDeque<NodeIndex> = self.source.parents(start).iter().copied().collect();
        while let Some(current) = queue.pop_front() {
            if current == target {
                return Ok(true);
            }
            if std::mem::replace(&mut visited[current], true) {
                continue;
            }
            queue.extend(self.source.parents(current).iter().copied());
        }
        Ok(false)
    }

    fn start_node(&self, entity_id: &str) -> HierarchyResult<NodeIndex> {
        self.source
            .declared_index(entity_id)
            .ok_or_else(|| EntityNotFoundError::new(entity_id))
    }

    fn walk(
        &self,
        entity_id: &str,
        max_depth: TraversalDepth,
        direction: Direction,
    ) -> HierarchyResult<Vec<&'a str>> {
        let start = self.start_node(entity_id)?;

        let mut visited = vec![false; self.source.node_count()];
        let mut queue = VecDeque::with_capacity(64);
        let mut order = Vec::new();

        visited[start] = true;
        queue.push_back((start, 0usize));

        while let Some((current, hops)) = queue.pop_front() {
            order.push(current);
            if !max_depth.allows(hops + 1) {
                continue;
            }

            let next = match direction {
                Direction::Up => self.source.parents(current),
                Direction::Down => self.source.children(current),
            };
            for &neighbor in next {
                if !visited[neighbor] {
                    visited[neighbor] = true;
                    queue.push_back((neighbor, hops + 1));
                }
            }
        }

        Ok(self.resolve(&order))
    }

    fn resolve(&self, nodes: &[NodeIndex]) -> Vec<&'a str> {
        let source = self.source;
        nodes.iter().map(|&node| source.node_id(node)).collect()
    }
}
