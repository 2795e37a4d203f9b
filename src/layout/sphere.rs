//! Node placement on a sphere.
//!
//! Two policies are supported:
//!
//! - **Spiral:** a Fibonacci sphere. Latitude sweeps linearly from the north
//!   pole (`y = 1`) to the south pole (`y = -1`) while the longitude advances
//!   by the golden angle `π(3 − √5)` per node. Deterministic and evenly
//!   spread; the first node always sits on the pole.
//! - **Rejection sampling:** uniform random points on the sphere surface
//!   (`θ = acos(2u − 1)`, `φ = 2πv`), accepted only when they are farther
//!   than a minimum separation from every point accepted so far. Each node
//!   has an attempt budget; exhausting it fails the whole layout.

use rand::Rng;
use serde::Deserialize;

use crate::error::{Result, VizError};
use crate::geometry::Point3;
use crate::graph::NodeId;
use crate::spatial::SpatialIndex;

/// Longitude increment between consecutive spiral nodes (≈ 2.39996 rad).
pub fn golden_angle() -> f32 {
    std::f32::consts::PI * (3.0 - 5.0f32.sqrt())
}

fn default_max_attempts() -> u32 {
    1000
}

/// Placement policy.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum LayoutMode {
    /// Fibonacci sphere.
    #[default]
    Spiral,
    /// Uniform random surface points with a minimum pairwise distance.
    Rejection {
        /// Accepted points are strictly farther apart than this.
        min_separation: f32,
        /// Candidates drawn per node before giving up (default: 1000).
        #[serde(default = "default_max_attempts")]
        max_attempts_per_node: u32,
        /// RNG seed. Callers without one supply their own entropy.
        #[serde(default)]
        seed: Option<u64>,
    },
}

/// Fibonacci sphere of `n` points at `radius`.
///
/// A single node lands on the north pole `(0, radius, 0)`.
pub fn spiral_layout(n: usize, radius: f32) -> Result<Vec<Point3>> {
    validate_radius(radius)?;

    let golden = golden_angle();
    let denom = n.saturating_sub(1) as f32;

    let positions = (0..n)
        .map(|i| {
            let frac = if n > 1 { i as f32 / denom } else { 0.0 };
            let y = 1.0 - 2.0 * frac;
            let ring_radius = (1.0 - y * y).max(0.0).sqrt();
            let angle = i as f32 * golden;

            Point3::new(angle.cos() * ring_radius, y, angle.sin() * ring_radius) * radius
        })
        .collect();

    Ok(positions)
}

/// Rejection-sampled layout of `n` points at `radius`.
///
/// Every accepted pair is strictly farther apart than `min_separation`.
/// Fails with [`VizError::LayoutUnsatisfiable`] when a node cannot be
/// placed within `max_attempts_per_node` draws.
pub fn rejection_layout<R: Rng + ?Sized>(
    n: usize,
    radius: f32,
    min_separation: f32,
    max_attempts_per_node: u32,
    rng: &mut R,
) -> Result<Vec<Point3>> {
    validate_radius(radius)?;
    if !min_separation.is_finite() || min_separation < 0.0 {
        return Err(VizError::InvalidConfig(format!(
            "minimum separation must be a non-negative number, got {min_separation}"
        )));
    }
    if max_attempts_per_node == 0 {
        return Err(VizError::InvalidConfig(
            "attempt budget per node must be at least 1".into(),
        ));
    }

    let mut positions = Vec::with_capacity(n);
    let mut accepted = SpatialIndex::new();
    let mut total_attempts: u64 = 0;

    for index in 0..n {
        let mut placed = false;

        for _ in 0..max_attempts_per_node {
            total_attempts += 1;
            let candidate = random_surface_point(radius, rng);

            let clear = accepted
                .nearest_distance(candidate)
                .is_none_or(|d| d > min_separation);
            if clear {
                accepted.insert(NodeId(index as u32), candidate);
                positions.push(candidate);
                placed = true;
                break;
            }
        }

        if !placed {
            log::warn!(
                "rejection layout gave up on node {index}/{n} after {max_attempts_per_node} attempts \
                 (radius={radius}, min_separation={min_separation})"
            );
            return Err(VizError::LayoutUnsatisfiable {
                index,
                count: n,
                min_separation,
                attempts: max_attempts_per_node,
            });
        }
    }

    log::debug!("rejection layout placed {n} nodes in {total_attempts} draws");
    Ok(positions)
}

/// Uniform point on the sphere surface via inverse-cosine latitude sampling.
fn random_surface_point<R: Rng + ?Sized>(radius: f32, rng: &mut R) -> Point3 {
    let u: f32 = rng.r#gen();
    let v: f32 = rng.r#gen();

    let theta = (2.0 * u - 1.0).clamp(-1.0, 1.0).acos();
    let phi = std::f32::consts::TAU * v;

    Point3::new(
        theta.sin() * phi.cos(),
        theta.cos(),
        theta.sin() * phi.sin(),
    ) * radius
}

fn validate_radius(radius: f32) -> Result<()> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        Err(VizError::InvalidConfig(format!(
            "sphere radius must be a positive number, got {radius}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const EPS: f32 = 1e-3;

    #[test]
    fn test_golden_angle() {
        assert!((golden_angle() - 2.39996).abs() < 1e-4);
    }

    #[test]
    fn test_spiral_empty() {
        assert!(spiral_layout(0, 130.0).unwrap().is_empty());
    }

    #[test]
    fn test_spiral_single_node_on_pole() {
        let points = spiral_layout(1, 130.0).unwrap();
        assert_eq!(points.len(), 1);
        let p = points[0];
        assert!(p.x.abs() < EPS, "x={}", p.x);
        assert!((p.y - 130.0).abs() < EPS, "y={}", p.y);
        assert!(p.z.abs() < EPS, "z={}", p.z);
    }

    #[test]
    fn test_spiral_points_on_sphere() {
        for n in 1..60 {
            let radius = 130.0;
            for (i, p) in spiral_layout(n, radius).unwrap().iter().enumerate() {
                let r = p.length();
                assert!(
                    (r - radius).abs() < 1e-2,
                    "n={n} i={i}: distance from origin {r}"
                );
            }
        }
    }

    #[test]
    fn test_spiral_deterministic() {
        let a = spiral_layout(25, 42.0).unwrap();
        let b = spiral_layout(25, 42.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_spiral_four_nodes_latitudes() {
        let points = spiral_layout(4, 1.0).unwrap();
        let expected_y = [1.0, 1.0 / 3.0, -1.0 / 3.0, -1.0];

        for (i, p) in points.iter().enumerate() {
            let y = expected_y[i];
            assert!((p.y - y).abs() < EPS, "i={i}: y={} expected {y}", p.y);

            let ring = (p.x * p.x + p.z * p.z).sqrt();
            let expected_ring = (1.0 - y * y).max(0.0).sqrt();
            assert!(
                (ring - expected_ring).abs() < EPS,
                "i={i}: ring radius {ring} expected {expected_ring}"
            );

            let angle = i as f32 * golden_angle();
            assert!((p.x - angle.cos() * expected_ring).abs() < EPS);
            assert!((p.z - angle.sin() * expected_ring).abs() < EPS);
        }
    }

    #[test]
    fn test_invalid_radius() {
        assert!(matches!(
            spiral_layout(3, 0.0),
            Err(VizError::InvalidConfig(_))
        ));
        assert!(matches!(
            spiral_layout(3, f32::NAN),
            Err(VizError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejection_respects_min_separation() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let min_sep = 40.0;
        let points = rejection_layout(12, 130.0, min_sep, 5000, &mut rng).unwrap();

        assert_eq!(points.len(), 12);
        for (i, a) in points.iter().enumerate() {
            assert!((a.length() - 130.0).abs() < 1e-2);
            for b in &points[i + 1..] {
                let d = a.distance_to(*b);
                assert!(d > min_sep, "pair too close: {d}");
            }
        }
    }

    #[test]
    fn test_rejection_same_seed_same_layout() {
        let a = rejection_layout(8, 50.0, 5.0, 100, &mut ChaCha8Rng::seed_from_u64(99)).unwrap();
        let b = rejection_layout(8, 50.0, 5.0, 100, &mut ChaCha8Rng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejection_unsatisfiable() {
        // No two points on a sphere are farther apart than its diameter.
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = rejection_layout(3, 10.0, 25.0, 50, &mut rng).unwrap_err();
        assert_eq!(
            err,
            VizError::LayoutUnsatisfiable {
                index: 1,
                count: 3,
                min_separation: 25.0,
                attempts: 50,
            }
        );
    }

    #[test]
    fn test_rejection_empty_and_invalid() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!(rejection_layout(0, 10.0, 1.0, 10, &mut rng).unwrap().is_empty());
        assert!(matches!(
            rejection_layout(2, 10.0, -1.0, 10, &mut rng),
            Err(VizError::InvalidConfig(_))
        ));
        assert!(matches!(
            rejection_layout(2, 10.0, 1.0, 0, &mut rng),
            Err(VizError::InvalidConfig(_))
        ));
    }
}
