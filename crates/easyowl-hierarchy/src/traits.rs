//! Traits for hierarchy traversal.
//!
//! This module defines the [`HierarchySource`] trait that
//! [`HierarchyTraverser`](crate::HierarchyTraverser) walks. The crate's own
//! [`HierarchyIndex`](crate::HierarchyIndex) implements it; other
//! arena-backed graphs can implement it to reuse the traversal code.
//!
//! Nodes are addressed by dense [`NodeIndex`] values so traversals can keep
//! their visited set as a flat vector instead of hashing identifiers.

/// Position of a node in a [`HierarchySource`]'s arena.
pub type NodeIndex = usize;

/// A graph of class identifiers with parent and child adjacency.
///
/// # Required Methods
///
/// - [`node_count`](Self::node_count) - Size of the arena
/// - [`node_index`](Self::node_index) - Identifier to arena position
/// - [`node_id`](Self::node_id) - Arena position to identifier
/// - [`parents`](Self::parents) / [`children`](Self::children) - Direct adjacency
/// - [`is_declared`](Self::is_declared) - Declared entity or dangling reference
///
/// Adjacency lists must not contain duplicates and must be exact inverses of
/// each other: `p` is in `parents(c)` exactly when `c` is in `children(p)`.
pub trait HierarchySource: Send + Sync {
    /// Number of nodes in the arena. Valid indexes are `0..node_count()`.
    fn node_count(&self) -> usize;

    /// Arena position of an identifier, if it appears anywhere in the graph.
    fn node_index(&self, id: &str) -> Option<NodeIndex>;

    /// Identifier stored at an arena position.
    ///
    /// Panics if `node` is out of range.
    fn node_id(&self, node: NodeIndex) -> &str;

    /// Direct parents of a node, in input order.
    fn parents(&self, node: NodeIndex) -> &[NodeIndex];

    /// Direct children of a node, in input order.
    fn children(&self, node: NodeIndex) -> &[NodeIndex];

    /// Returns `true` if the node is a declared entity rather than a
    /// reference to an identifier that was never declared.
    fn is_declared(&self, node: NodeIndex) -> bool;

    /// Arena position of a declared entity.
    fn declared_index(&self, id: &str) -> Option<NodeIndex> {
        self.node_index(id).filter(|&node| self.is_declared(node))
    }
}
