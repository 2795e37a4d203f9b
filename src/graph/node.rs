//! Node type and related structures.
//!
//! Nodes are the project panels on the sphere. Each node has:
//! - A contiguous index in [0, N) that doubles as its identifier
//! - A position in scene space, fixed at layout time

use std::fmt;

use crate::geometry::Point3;

/// Node identifier.
///
/// Nodes are never added or removed after layout, so the identifier is
/// simply the node's index. It wraps a u32 for WebAssembly interop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Create a new NodeId from a raw u32.
    #[inline]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw u32 value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    /// Index into per-node arrays.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

impl From<u32> for NodeId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<NodeId> for u32 {
    #[inline]
    fn from(id: NodeId) -> Self {
        id.0
    }
}

/// A laid-out node. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    id: NodeId,
    position: Point3,
}

impl Node {
    pub fn new(id: NodeId, position: Point3) -> Self {
        Self { id, position }
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn position(&self) -> Point3 {
        self.position
    }
}

/// Wrap layout output into nodes with contiguous ids.
pub fn nodes_from_positions(positions: &[Point3]) -> Vec<Node> {
    positions
        .iter()
        .enumerate()
        .map(|(i, &p)| Node::new(NodeId(i as u32), p))
        .collect()
}
