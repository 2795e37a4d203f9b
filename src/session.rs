//! VisualizationSession - everything one page view needs.
//!
//! A session owns the laid-out nodes, the ring edges, a spatial index over
//! the node positions, the camera navigator and the content provider.
//! Input events from the page are translated into navigator calls; the
//! renderer pulls a [`RenderFrame`] once per animation frame after `tick`.

use petgraph::graph::UnGraph;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::camera::{CameraNavigator, CameraState};
use crate::config::SessionConfig;
use crate::content::{ContentProvider, NodeContent, NumberedContent};
use crate::error::Result;
use crate::geometry::Point3;
use crate::graph::{self, Edge, Node, NodeId};
use crate::layout;
use crate::spatial::SpatialIndex;

/// Rejection-sampling seed when the config carries none.
const DEFAULT_SEED: u64 = 0x5eed_0f_b0b;

/// A UI event already resolved to a node index or wheel delta.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum InputEvent {
    /// A node panel was clicked.
    NodeClicked { index: u32 },
    /// Raw wheel delta, scaled by `scrollScale` before use.
    Wheel { delta_y: f32 },
    /// A navigation-bar button for a node was pressed.
    NavButton { index: u32 },
}

/// Per-node render data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderNode {
    pub index: u32,
    pub position: Point3,
    pub title: String,
    pub link: Option<String>,
    /// Unit vector from the node toward the camera, for camera-facing panels.
    pub facing: Point3,
}

/// Camera data for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraSnapshot {
    pub position: Point3,
    pub look_at: Point3,
    pub transitioning: bool,
    pub progress: Option<f32>,
}

/// Everything the renderer draws for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderFrame {
    pub nodes: Vec<RenderNode>,
    pub edges: Vec<[u32; 2]>,
    pub camera: CameraSnapshot,
}

/// Layout, topology and camera for one page view.
pub struct VisualizationSession {
    config: SessionConfig,
    nodes: Vec<Node>,
    /// Same positions as `nodes`, kept contiguous for navigator lookups.
    positions: Vec<Point3>,
    /// `[x0, y0, z0, x1, ...]` for zero-copy upload.
    positions_flat: Vec<f32>,
    edges: Vec<Edge>,
    ring: UnGraph<NodeId, ()>,
    spatial: SpatialIndex,
    navigator: CameraNavigator,
    content: Box<dyn ContentProvider>,
}

impl VisualizationSession {
    /// Lay out nodes, derive edges and place the camera.
    pub fn new(config: SessionConfig) -> Result<Self> {
        config.validate()?;

        let seed = config.layout_seed().unwrap_or(DEFAULT_SEED);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let positions = layout::layout(
            config.node_count,
            config.sphere_radius,
            &config.layout,
            &mut rng,
        )?;

        let nodes = graph::nodes_from_positions(&positions);
        let positions_flat = positions.iter().flat_map(|p| p.to_array()).collect();
        let edges = graph::ring_edges(nodes.len());
        let ring = graph::ring_graph(nodes.len(), &edges);

        let mut spatial = SpatialIndex::new();
        let points: Vec<_> = nodes.iter().map(|n| (n.id(), n.position())).collect();
        spatial.rebuild(&points);

        let navigator = CameraNavigator::new(
            config.camera_position,
            config.look_at,
            config.look_at_mode,
        );

        log::info!(
            "session ready: {} nodes, {} edges, radius {}, {:?} layout",
            nodes.len(),
            edges.len(),
            config.sphere_radius,
            config.layout
        );

        Ok(Self {
            config,
            nodes,
            positions,
            positions_flat,
            edges,
            ring,
            spatial,
            navigator,
            content: Box::new(NumberedContent),
        })
    }

    /// Replace the content provider.
    pub fn with_content(mut self, content: impl ContentProvider + 'static) -> Self {
        self.set_content(content);
        self
    }

    pub fn set_content(&mut self, content: impl ContentProvider + 'static) {
        self.content = Box::new(content);
    }

    // =========================================================================
    // Read access
    // =========================================================================

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn positions(&self) -> &[Point3] {
        &self.positions
    }

    /// Interleaved positions `[x0, y0, z0, x1, y1, z1, ...]`.
    pub fn positions_flat(&self) -> &[f32] {
        &self.positions_flat
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Edges as `[a0, b0, a1, b1, ...]`.
    pub fn edge_pairs_flat(&self) -> Vec<u32> {
        self.edges.iter().flat_map(|e| e.to_pair()).collect()
    }

    /// Ring neighbors of a node, ascending. Empty for unknown nodes.
    pub fn neighbors(&self, id: NodeId) -> Vec<NodeId> {
        graph::neighbors(&self.ring, id)
    }

    /// The node closest to a point in scene space.
    pub fn nearest_node(&self, point: Point3) -> Option<NodeId> {
        self.spatial.nearest(point)
    }

    pub fn camera(&self) -> &CameraState {
        self.navigator.state()
    }

    pub fn navigator(&self) -> &CameraNavigator {
        &self.navigator
    }

    pub fn content(&self, id: NodeId) -> Option<NodeContent> {
        if id.index() >= self.nodes.len() {
            return None;
        }
        self.content.content(id)
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Start a transition to a node. Unknown indices are ignored.
    pub fn focus_node(&mut self, index: usize) -> bool {
        let accepted = self.navigator.request_focus(
            index,
            &self.positions,
            self.config.standoff_distance,
        );
        if accepted {
            log::info!("zooming to {}", NodeId(index as u32));
        }
        accepted
    }

    /// Nudge the camera toward the nearest node by `delta_y * scroll_scale`.
    ///
    /// Returns the node the camera moved toward. Equidistant nodes resolve
    /// to the lowest index.
    pub fn scroll(&mut self, delta_y: f32) -> Option<NodeId> {
        let delta = delta_y * self.config.scroll_scale;
        self.navigator
            .on_scroll_nudge(delta, &self.positions)
            .map(|index| NodeId(index as u32))
    }

    /// Apply one input event. Returns whether camera state changed.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::NodeClicked { index } => {
                log::debug!("{} clicked", NodeId(index));
                self.focus_node(index as usize)
            }
            InputEvent::NavButton { index } => {
                log::info!("nav button for {} pressed", NodeId(index));
                self.focus_node(index as usize)
            }
            InputEvent::Wheel { delta_y } => {
                let before = self.navigator.position();
                self.scroll(delta_y);
                self.navigator.position() != before
            }
        }
    }

    /// Move the orbit target from an external orbit control.
    pub fn set_orbit_target(&mut self, target: Point3) {
        self.navigator.set_orbit_target(target);
    }

    /// Advance the camera by the configured step.
    pub fn tick(&mut self) {
        self.navigator.tick(self.config.step_size);
    }

    /// Advance the camera by an explicit step.
    ///
    /// Steps too small to change an `f32` progress near 1 never finish the
    /// transition; the configured step is validated against this.
    pub fn tick_by(&mut self, step: f32) {
        self.navigator.tick(step);
    }

    // =========================================================================
    // Render output
    // =========================================================================

    pub fn camera_snapshot(&self) -> CameraSnapshot {
        let state = self.navigator.state();
        CameraSnapshot {
            position: state.position,
            look_at: state.look_at,
            transitioning: state.transition.is_some(),
            progress: state.transition.map(|t| t.progress),
        }
    }

    /// Nodes, edges and camera for the current frame.
    pub fn render_frame(&self) -> RenderFrame {
        let camera = self.navigator.position();

        let nodes = self
            .nodes
            .iter()
            .map(|node| {
                let content = self
                    .content
                    .content(node.id())
                    .unwrap_or_else(|| NumberedContent::numbered(node.id()));
                RenderNode {
                    index: node.id().raw(),
                    position: node.position(),
                    title: content.title,
                    link: content.link,
                    facing: (camera - node.position()).normalize(),
                }
            })
            .collect();

        RenderFrame {
            nodes,
            edges: self.edges.iter().map(|e| e.to_pair()).collect(),
            camera: self.camera_snapshot(),
        }
    }
}
