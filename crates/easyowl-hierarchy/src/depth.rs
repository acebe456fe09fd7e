//! Traversal depth bounds.

use std::fmt;

/// How many hops a traversal may take from its start node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TraversalDepth {
    /// No bound; walk until the reachable set is exhausted.
    #[default]
    Unbounded,
    /// At most this many hops. `Limited(0)` yields only the start node.
    Limited(usize),
}

impl TraversalDepth {
    /// Sentinel accepted by [`From<i32>`] for an unbounded walk.
    pub const UNLIMITED_SENTINEL: i32 = -1;

    /// Returns `true` if a node `hops` edges from the start is within bounds.
    pub fn allows(self, hops: usize) -> bool {
        match self {
            Self::Unbounded => true,
            Self::Limited(max) => hops <= max,
        }
    }
}

/// Any negative value is treated like the `-1` sentinel.
impl From<i32> for TraversalDepth {
    fn from(max_depth: i32) -> Self {
        match usize::try_from(max_depth) {
            Ok(hops) => Self::Limited(hops),
            Err(_) => Self::Unbounded,
        }
    }
}

impl From<usize> for TraversalDepth {
    fn from(hops: usize) -> Self {
        Self::Limited(hops)
    }
}

impl fmt::Display for TraversalDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unbounded => f.write_str("unbounded"),
            Self::Limited(hops) => write!(f, "{hops}"),
        }
    }
}
