//! Forward and reverse adjacency derived from `subclasses`.

use std::collections::HashMap;

use easyowl::EntityMap;
use tracing::debug;

use crate::traits::{HierarchySource, NodeIndex};

/// Read-only parent/child adjacency over an arena of identifiers.
///
/// Declared entities occupy positions `0..declared_count()` in the same
/// order as the [`EntityMap`] they were built from. Identifiers that are only
/// referenced as parents (dangling references from incomplete imports) are
/// appended after them, in order of first reference.
///
/// The index is built in one pass and never mutated afterwards. The graph is
/// not assumed to be acyclic.
#[derive(Debug, Clone, Default)]
pub struct HierarchyIndex {
    ids: Vec<String>,
    positions: HashMap<String, NodeIndex>,
    declared: usize,
    parents: Vec<Vec<NodeIndex>>,
    children: Vec<Vec<NodeIndex>>,
    edge_count: usize,
}

impl HierarchyIndex {
    /// Builds the index by inverting every entity's `subclasses`.
    pub fn build(entities: &EntityMap) -> Self {
        let mut index = Self {
            ids: Vec::with_capacity(entities.len()),
            positions: HashMap::with_capacity(entities.len()),
            declared: entities.len(),
            parents: Vec::with_capacity(entities.len()),
            children: Vec::with_capacity(entities.len()),
            edge_count: 0,
        };

        for id in entities.ids() {
            index.intern(id);
        }

        for (child, entity) in entities.iter().enumerate() {
            for parent_id in &entity.subclasses {
                let parent = index.intern(parent_id);
                index.add_edge(child, parent);
            }
        }

        debug!(
            nodes = index.ids.len(),
            declared = index.declared,
            dangling = index.dangling_count(),
            edges = index.edge_count,
            "built hierarchy index"
        );

        index
    }

    fn intern(&mut self, id: &str) -> NodeIndex {
        if let Some(&node) = self.positions.get(id) {
            return node;
        }
        let node = self.ids.len();
        self.ids.push(id.to_string());
        self.positions.insert(id.to_string(), node);
        self.parents.push(Vec::new());
        self.children.push(Vec::new());
        node
    }

    fn add_edge(&mut self, child: NodeIndex, parent: NodeIndex) {
        if self.parents[child].contains(&parent) {
            return;
        }
        self.parents[child].push(parent);
        self.children[parent].push(child);
        self.edge_count += 1;
    }

    /// Number of declared entities.
    pub fn declared_count(&self) -> usize {
        self.declared
    }

    /// Number of identifiers referenced as parents but never declared.
    pub fn dangling_count(&self) -> usize {
        self.ids.len() - self.declared
    }

    /// Number of distinct parent/child edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns `true` if `id` appears in the graph, declared or not.
    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    /// Direct parents of `id`, or `None` if `id` is not in the graph.
    pub fn direct_parents(&self, id: &str) -> Option<Vec<&str>> {
        let node = self.node_index(id)?;
        Some(self.resolve(&self.parents[node]))
    }

    /// Direct children of `id`, or `None` if `id` is not in the graph.
    pub fn direct_children(&self, id: &str) -> Option<Vec<&str>> {
        let node = self.node_index(id)?;
        Some(self.resolve(&self.children[node]))
    }

    /// Identifiers that were referenced as parents but never declared.
    pub fn dangling_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.ids[self.declared..].iter().map(String::as_str)
    }

    fn resolve(&self, nodes: &[NodeIndex]) -> Vec<&str> {
        nodes.iter().map(|&n| self.ids[n].as_str()).collect()
    }
}

impl HierarchySource for HierarchyIndex {
    fn node_count(&self) -> usize {
        self.ids.len()
    }

    fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.positions.get(id).copied()
    }

    fn node_id(&self, node: NodeIndex) -> &str {
        &self.ids[node]
    }

    fn parents(&self, node: NodeIndex) -> &[NodeIndex] {
        &self.parents[node]
    }

    fn children(&self, node: NodeIndex) -> &[NodeIndex] {
        &self.children[node]
    }

    fn is_declared(&self, node: NodeIndex) -> bool {
        node < self.declared
    }
}
