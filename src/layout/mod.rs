//! Layout algorithms for node placement.
//!
//! Layouts compute fixed 3D positions for every node once per session.
//! The renderer places one camera-facing panel at each position.

pub mod sphere;

pub use sphere::{LayoutMode, golden_angle, rejection_layout, spiral_layout};

use rand::Rng;

use crate::error::Result;
use crate::geometry::Point3;

/// Lay out `n` nodes on a sphere of `radius` using `mode`.
///
/// `rng` is only drawn from in rejection mode.
pub fn layout<R: Rng + ?Sized>(
    n: usize,
    radius: f32,
    mode: &LayoutMode,
    rng: &mut R,
) -> Result<Vec<Point3>> {
    match *mode {
        LayoutMode::Spiral => spiral_layout(n, radius),
        LayoutMode::Rejection {
            min_separation,
            max_attempts_per_node,
            ..
        } => rejection_layout(n, radius, min_separation, max_attempts_per_node, rng),
    }
}
