//! Ring topology: every node linked to its successor.
//!
//! Node `i` is connected to node `(i + 1) mod n`, which closes the laid-out
//! nodes into a single cycle. Fewer than two nodes produce no edges; a
//! single node never gets a self-loop.

use petgraph::graph::{NodeIndex, UnGraph};

use super::edge::Edge;
use super::node::NodeId;

/// Cycle edges for `n` nodes.
///
/// For n = 2 the rule yields both (0, 1) and (1, 0), one line per node.
pub fn ring_edges(n: usize) -> Vec<Edge> {
    if n <= 1 {
        return Vec::new();
    }

    (0..n)
        .map(|i| Edge::new(NodeId(i as u32), NodeId(((i + 1) % n) as u32)))
        .collect()
}

/// Undirected graph over `n` nodes holding the given edges.
///
/// Node weights are the stable ids; `NodeIndex::new(i)` addresses node `i`.
pub fn ring_graph(n: usize, edges: &[Edge]) -> UnGraph<NodeId, ()> {
    let mut graph = UnGraph::with_capacity(n, edges.len());
    for i in 0..n {
        graph.add_node(NodeId(i as u32));
    }
    for edge in edges {
        graph.add_edge(
            NodeIndex::new(edge.a.index()),
            NodeIndex::new(edge.b.index()),
            (),
        );
    }
    graph
}

/// Distinct neighbors of a node in ascending order.
pub fn neighbors(graph: &UnGraph<NodeId, ()>, id: NodeId) -> Vec<NodeId> {
    if id.index() >= graph.node_count() {
        return Vec::new();
    }

    let mut out: Vec<NodeId> = graph
        .neighbors(NodeIndex::new(id.index()))
        .filter_map(|n| graph.node_weight(n).copied())
        .collect();
    out.sort_unstable();
    out.dedup();
    out
}
