//! Camera navigation between laid-out nodes.
//!
//! The navigator is a two-state machine:
//!
//! - **Idle:** no transition; `tick` does nothing.
//! - **Transitioning:** one active [`Transition`]. Every `tick` advances its
//!   progress by a fixed step and moves the camera `progress` of the way
//!   toward the target. Because the lerp is applied to the already-moved
//!   position each frame, the camera converges quickly at first and then
//!   settles, reaching the target when progress hits 1.
//!
//! A focus request always replaces the active transition; nothing is
//! queued. Scroll nudges move the camera directly and are independent of
//! the transition state.

use serde::Deserialize;

use crate::geometry::{Point3, nearest_index};

/// Progress advanced per tick when the caller does not choose a step.
pub const DEFAULT_STEP: f32 = 0.05;

/// Rounding slack when deciding that progress reached 1.
const PROGRESS_EPSILON: f32 = 1e-4;

/// Which point the camera looks at while transitioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LookAtMode {
    /// Look at the orbit target, which a focus request moves to the node.
    #[default]
    OrbitTarget,
    /// Look at the transition's own look-at point; the orbit target is left
    /// to the external orbit control.
    TransitionTarget,
}

/// An in-flight camera move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub target_position: Point3,
    pub target_look_at: Point3,
    /// In [0, 1]; non-decreasing while the transition is active.
    pub progress: f32,
}

/// Camera position and orientation targets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub position: Point3,
    pub look_at: Point3,
    pub orbit_target: Point3,
    pub transition: Option<Transition>,
}

/// Navigator state as seen from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigatorPhase {
    Idle,
    Transitioning,
}

/// Owns the camera state and drives focus transitions.
#[derive(Debug, Clone)]
pub struct CameraNavigator {
    state: CameraState,
    look_at_mode: LookAtMode,
}

impl CameraNavigator {
    /// Camera at `position` looking at (and orbiting) `look_at`.
    pub fn new(position: Point3, look_at: Point3, look_at_mode: LookAtMode) -> Self {
        Self {
            state: CameraState {
                position,
                look_at,
                orbit_target: look_at,
                transition: None,
            },
            look_at_mode,
        }
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    pub fn position(&self) -> Point3 {
        self.state.position
    }

    pub fn look_at(&self) -> Point3 {
        self.state.look_at
    }

    pub fn orbit_target(&self) -> Point3 {
        self.state.orbit_target
    }

    pub fn transition(&self) -> Option<&Transition> {
        self.state.transition.as_ref()
    }

    pub fn look_at_mode(&self) -> LookAtMode {
        self.look_at_mode
    }

    pub fn phase(&self) -> NavigatorPhase {
        if self.state.transition.is_some() {
            NavigatorPhase::Transitioning
        } else {
            NavigatorPhase::Idle
        }
    }

    pub fn is_transitioning(&self) -> bool {
        self.phase() == NavigatorPhase::Transitioning
    }

    /// Move the orbit target, e.g. after the user drags an orbit control.
    pub fn set_orbit_target(&mut self, target: Point3) {
        self.state.orbit_target = target;
    }

    /// Start a transition toward the node at `target_index`.
    ///
    /// The camera backs off `standoff` from the node along the ray from the
    /// node through the current camera position (+Z when the camera sits on
    /// the node). Any active transition is replaced. Out-of-range indices
    /// are ignored and return `false`.
    pub fn request_focus(
        &mut self,
        target_index: usize,
        positions: &[Point3],
        standoff: f32,
    ) -> bool {
        let Some(&node) = positions.get(target_index) else {
            log::debug!(
                "ignoring focus request for node {target_index}, only {} nodes",
                positions.len()
            );
            return false;
        };

        let mut direction = (self.state.position - node).normalize();
        if direction == Point3::ORIGIN {
            direction = Point3::UNIT_Z;
        }

        let target_position = node + direction * standoff;

        if let Some(previous) = self.state.transition {
            log::debug!(
                "focus on node {target_index} replaces transition at progress {:.2}",
                previous.progress
            );
        }

        if self.look_at_mode == LookAtMode::OrbitTarget {
            self.state.orbit_target = node;
        }
        self.state.transition = Some(Transition {
            target_position,
            target_look_at: node,
            progress: 0.0,
        });
        true
    }

    /// Advance the active transition by `step`. No-op when idle.
    ///
    /// Negative or non-finite steps leave progress unchanged but still
    /// apply the lerp for the current progress.
    pub fn tick(&mut self, step: f32) {
        let Some(mut transition) = self.state.transition else {
            return;
        };

        let step = if step.is_finite() { step.max(0.0) } else { 0.0 };
        transition.progress = (transition.progress + step).min(1.0);
        if 1.0 - transition.progress <= PROGRESS_EPSILON {
            transition.progress = 1.0;
        }

        self.state.position = self
            .state
            .position
            .lerp(transition.target_position, transition.progress);
        self.state.look_at = match self.look_at_mode {
            LookAtMode::OrbitTarget => self.state.orbit_target,
            LookAtMode::TransitionTarget => transition.target_look_at,
        };

        if transition.progress >= 1.0 {
            self.state.transition = None;
        } else {
            self.state.transition = Some(transition);
        }
    }

    /// Nudge the camera `delta` toward the node closest to it.
    ///
    /// Returns the index of that node, or None when there are no nodes.
    pub fn on_scroll_nudge(&mut self, delta: f32, positions: &[Point3]) -> Option<usize> {
        let index = nearest_index(positions, self.state.position)?;
        self.nudge_toward(delta, positions[index]);
        Some(index)
    }

    /// Move the camera `delta` along the unit direction toward `node`.
    ///
    /// Leaves the orbit target and any transition untouched. A camera
    /// sitting exactly on the node does not move.
    pub fn nudge_toward(&mut self, delta: f32, node: Point3) {
        if !delta.is_finite() {
            return;
        }
        let direction = (node - self.state.position).normalize();
        self.state.position = self.state.position + direction * delta;
    }
}
