//! R-tree based spatial index using the rstar crate.
//!
//! Provides O(log n) spatial queries over node positions in 3D:
//! - Nearest neighbor (picking the node under a scene-space point)
//! - Nearest distance (minimum separation checks during layout)

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use crate::geometry::Point3;
use crate::graph::NodeId;

/// A point in the spatial index with associated node ID.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodePoint {
    /// The node identifier.
    pub id: NodeId,
    /// Position in scene space.
    pub position: Point3,
}

impl NodePoint {
    /// Create a new NodePoint.
    pub fn new(id: NodeId, position: Point3) -> Self {
        Self { id, position }
    }
}

impl RTreeObject for NodePoint {
    type Envelope = AABB<[f32; 3]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position.to_array())
    }
}

impl PointDistance for NodePoint {
    fn distance_2(&self, point: &[f32; 3]) -> f32 {
        self.position.distance_squared_to(Point3::from(*point))
    }

    fn contains_point(&self, point: &[f32; 3]) -> bool {
        let p = Point3::from(*point);
        (self.position.x - p.x).abs() < f32::EPSILON
            && (self.position.y - p.y).abs() < f32::EPSILON
            && (self.position.z - p.z).abs() < f32::EPSILON
    }
}

/// Spatial index for laid-out nodes.
///
/// Uses an R*-tree for efficient spatial queries.
pub struct SpatialIndex {
    tree: RTree<NodePoint>,
}

impl SpatialIndex {
    /// Create a new empty spatial index.
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Insert a node into the index.
    pub fn insert(&mut self, id: NodeId, position: Point3) {
        self.tree.insert(NodePoint::new(id, position));
    }

    /// Find the nearest node to a point.
    pub fn nearest(&self, point: Point3) -> Option<NodeId> {
        self.tree
            .nearest_neighbor(&point.to_array())
            .map(|node| node.id)
    }

    /// Distance from a point to the closest indexed node.
    ///
    /// Returns None if the index is empty.
    pub fn nearest_distance(&self, point: Point3) -> Option<f32> {
        let query = point.to_array();
        self.tree
            .nearest_neighbor(&query)
            .map(|node| node.distance_2(&query).sqrt())
    }

    /// Rebuild the index from a list of (id, position) tuples.
    ///
    /// This is more efficient than incremental inserts for bulk updates.
    pub fn rebuild(&mut self, points: &[(NodeId, Point3)]) {
        let node_points: Vec<_> = points
            .iter()
            .map(|&(id, position)| NodePoint::new(id, position))
            .collect();

        self.tree = RTree::bulk_load(node_points);
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corners() -> Vec<(NodeId, Point3)> {
        vec![
            (NodeId(0), Point3::new(0.0, 0.0, 0.0)),
            (NodeId(1), Point3::new(10.0, 0.0, 0.0)),
            (NodeId(2), Point3::new(0.0, 10.0, 0.0)),
            (NodeId(3), Point3::new(0.0, 0.0, 10.0)),
        ]
    }

    #[test]
    fn test_nearest() {
        let mut index = SpatialIndex::new();
        index.rebuild(&corners());

        assert_eq!(index.nearest(Point3::new(1.0, 1.0, 1.0)), Some(NodeId(0)));
        assert_eq!(index.nearest(Point3::new(0.0, 0.0, 9.0)), Some(NodeId(3)));
    }

    #[test]
    fn test_nearest_distance() {
        let mut index = SpatialIndex::new();
        assert_eq!(index.nearest_distance(Point3::ORIGIN), None);

        index.insert(NodeId(0), Point3::new(0.0, 3.0, 4.0));
        let d = index.nearest_distance(Point3::ORIGIN).unwrap();
        assert!((d - 5.0).abs() < 1e-5);
    }
}
