//! Edge type.
//!
//! Edges are the line segments drawn between nodes. They are derived from
//! the node count and never mutated.

use super::node::NodeId;

/// Unordered pair of node identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub a: NodeId,
    pub b: NodeId,
}

impl Edge {
    #[inline]
    pub fn new(a: NodeId, b: NodeId) -> Self {
        Self { a, b }
    }

    /// `[a, b]` for flat GPU/JS buffers.
    #[inline]
    pub fn to_pair(self) -> [u32; 2] {
        [self.a.0, self.b.0]
    }
}
