//! Session configuration.
//!
//! Every field has a default, so a page can pass `{}` (or nothing) and get
//! the stock portfolio sphere: ten nodes on a radius-130 Fibonacci sphere,
//! camera at (0, 0, 150) looking at the origin, 50-unit standoff on focus.

use serde::Deserialize;

use crate::camera::{DEFAULT_STEP, LookAtMode};
use crate::error::{Result, VizError};
use crate::geometry::Point3;
use crate::layout::LayoutMode;

/// Smallest accepted `stepSize`. Finer steps are lost to `f32` rounding as
/// progress approaches 1 and the transition never completes.
pub const MIN_STEP_SIZE: f32 = 1e-4;

/// Configuration for a [`VisualizationSession`](crate::session::VisualizationSession).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionConfig {
    /// Number of nodes to lay out (default: 10).
    pub node_count: usize,
    /// Sphere radius (default: 130.0).
    pub sphere_radius: f32,
    /// Placement policy (default: spiral).
    pub layout: LayoutMode,
    /// Camera distance from a focused node (default: 50.0).
    pub standoff_distance: f32,
    /// Transition progress per tick (default: 0.05).
    pub step_size: f32,
    /// Multiplier from raw wheel delta to camera displacement (default: 0.01).
    pub scroll_scale: f32,
    /// Initial camera position (default: (0, 0, 150)).
    pub camera_position: Point3,
    /// Initial look-at and orbit target (default: origin).
    pub look_at: Point3,
    /// Look-at behavior during transitions (default: orbit target).
    pub look_at_mode: LookAtMode,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            node_count: 10,
            sphere_radius: 130.0,
            layout: LayoutMode::Spiral,
            standoff_distance: 50.0,
            step_size: DEFAULT_STEP,
            scroll_scale: 0.01,
            camera_position: Point3::new(0.0, 0.0, 150.0),
            look_at: Point3::ORIGIN,
            look_at_mode: LookAtMode::OrbitTarget,
        }
    }
}

impl SessionConfig {
    /// Check value ranges. Layout-specific parameters are checked by the
    /// layout itself.
    pub fn validate(&self) -> Result<()> {
        if !(self.sphere_radius.is_finite() && self.sphere_radius > 0.0) {
            return Err(invalid(format!(
                "sphereRadius must be a positive number, got {}",
                self.sphere_radius
            )));
        }
        if !(self.standoff_distance.is_finite() && self.standoff_distance >= 0.0) {
            return Err(invalid(format!(
                "standoffDistance must be a non-negative number, got {}",
                self.standoff_distance
            )));
        }
        if !(self.step_size.is_finite() && self.step_size >= MIN_STEP_SIZE) {
            return Err(invalid(format!(
                "stepSize must be a number >= {MIN_STEP_SIZE}, got {}",
                self.step_size
            )));
        }
        if !self.scroll_scale.is_finite() {
            return Err(invalid(format!(
                "scrollScale must be finite, got {}",
                self.scroll_scale
            )));
        }
        if !self.camera_position.is_finite() || !self.look_at.is_finite() {
            return Err(invalid("camera position and look-at must be finite".into()));
        }
        Ok(())
    }

    /// Seed used for rejection sampling, if the layout needs one.
    pub fn layout_seed(&self) -> Option<u64> {
        match self.layout {
            LayoutMode::Rejection { seed, .. } => seed,
            LayoutMode::Spiral => None,
        }
    }

    /// Fill in a rejection-sampling seed when the caller left it out.
    pub fn with_seed_if_missing(mut self, fallback: u64) -> Self {
        if let LayoutMode::Rejection { seed, .. } = &mut self.layout {
            seed.get_or_insert(fallback);
        }
        self
    }
}

fn invalid(msg: String) -> VizError {
    VizError::InvalidConfig(msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SessionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.node_count, 10);
        assert_eq!(config.sphere_radius, 130.0);
        assert_eq!(config.standoff_distance, 50.0);
        assert_eq!(config.step_size, 0.05);
        assert_eq!(config.camera_position, Point3::new(0.0, 0.0, 150.0));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad = [
            SessionConfig {
                sphere_radius: 0.0,
                ..Default::default()
            },
            SessionConfig {
                sphere_radius: f32::INFINITY,
                ..Default::default()
            },
            SessionConfig {
                standoff_distance: -1.0,
                ..Default::default()
            },
            SessionConfig {
                step_size: 0.0,
                ..Default::default()
            },
            SessionConfig {
                step_size: 1e-8,
                ..Default::default()
            },
            SessionConfig {
                scroll_scale: f32::NAN,
                ..Default::default()
            },
            SessionConfig {
                camera_position: Point3::new(f32::NAN, 0.0, 0.0),
                ..Default::default()
            },
        ];
        for config in bad {
            assert!(
                matches!(config.validate(), Err(VizError::InvalidConfig(_))),
                "{config:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_seed_fill() {
        let spiral = SessionConfig::default().with_seed_if_missing(5);
        assert_eq!(spiral.layout_seed(), None);

        let unseeded = SessionConfig {
            layout: LayoutMode::Rejection {
                min_separation: 10.0,
                max_attempts_per_node: 100,
                seed: None,
            },
            ..Default::default()
        };
        assert_eq!(unseeded.clone().with_seed_if_missing(5).layout_seed(), Some(5));

        let seeded = SessionConfig {
            layout: LayoutMode::Rejection {
                min_separation: 10.0,
                max_attempts_per_node: 100,
                seed: Some(1),
            },
            ..Default::default()
        };
        assert_eq!(seeded.with_seed_if_missing(5).layout_seed(), Some(1));
    }

    #[test]
    fn test_smallest_step_is_accepted() {
        let config = SessionConfig {
            step_size: MIN_STEP_SIZE,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_camel_case_json() {
        let config: SessionConfig = serde_json::from_str(
            r#"{
                "nodeCount": 4,
                "sphereRadius": 60,
                "stepSize": 0.1,
                "cameraPosition": { "x": 0, "y": 0, "z": 200 },
                "lookAtMode": "transitionTarget",
                "layout": { "kind": "rejection", "minSeparation": 20, "seed": 7 }
            }"#,
        )
        .unwrap();

        assert_eq!(config.node_count, 4);
        assert_eq!(config.sphere_radius, 60.0);
        assert_eq!(config.step_size, 0.1);
        assert_eq!(config.camera_position, Point3::new(0.0, 0.0, 200.0));
        assert_eq!(config.look_at_mode, LookAtMode::TransitionTarget);
        assert_eq!(
            config.layout,
            LayoutMode::Rejection {
                min_separation: 20.0,
                max_attempts_per_node: 1000,
                seed: Some(7),
            }
        );
        // Unnamed fields keep their defaults.
        assert_eq!(config.standoff_distance, 50.0);
        assert_eq!(config.scroll_scale, 0.01);
    }

    #[test]
    fn test_json_defaults_and_unknown_layout() {
        let empty: SessionConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, SessionConfig::default());

        let spiral: SessionConfig =
            serde_json::from_str(r#"{ "layout": { "kind": "spiral" } }"#).unwrap();
        assert_eq!(spiral.layout, LayoutMode::Spiral);

        let unknown = serde_json::from_str::<SessionConfig>(r#"{ "layout": { "kind": "grid" } }"#);
        assert!(unknown.is_err());
    }
}
