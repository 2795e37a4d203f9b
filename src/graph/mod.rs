//! Node and edge structures.
//!
//! Nodes are created once from the layout output and never change; edges
//! are derived from the node count by the ring topology. The ring is also
//! kept as a petgraph undirected graph for neighbor queries.

mod edge;
mod node;
mod ring;

pub use edge::Edge;
pub use node::{Node, NodeId, nodes_from_positions};
pub use ring::{neighbors, ring_edges, ring_graph};
