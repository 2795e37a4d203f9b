//! Portfolio Sphere - WASM Module
//!
//! This module provides the layout and camera-navigation core for the
//! portfolio sphere: project nodes placed on a sphere, linked into a ring,
//! and a camera that flies between them on click, scroll and navigation
//! buttons. It is compiled to WebAssembly and exposes a JavaScript-friendly
//! API via wasm-bindgen; the page owns the DOM panels and line rendering.
//!
//! # Architecture
//!
//! - `geometry`: `Point3` vector math shared by every module
//! - `layout`: Fibonacci-spiral and rejection-sampled sphere layouts
//! - `graph`: Node/edge types and the ring topology (petgraph)
//! - `spatial`: R-tree spatial index for nearest-node queries
//! - `camera`: Camera state machine with focus transitions and scroll nudges
//! - `content`: Node titles and links
//! - `session`: `VisualizationSession` tying the above together

use js_sys::Float32Array;
use wasm_bindgen::prelude::*;

pub mod camera;
pub mod config;
pub mod content;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod layout;
pub mod session;
pub mod spatial;

pub use config::SessionConfig;
pub use error::VizError;
pub use geometry::Point3;
pub use session::{InputEvent, RenderFrame, VisualizationSession};

use content::ContentTable;
use graph::NodeId;

/// Initialize the WASM module: panic messages and `log` output go to the
/// browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    #[cfg(target_arch = "wasm32")]
    {
        // A second init (e.g. module re-instantiation) keeps the first logger.
        let _ = console_log::init_with_level(log::Level::Info);
    }
}

/// Main entry point for the page.
///
/// This struct wraps a [`VisualizationSession`] and provides the public API
/// exposed to JavaScript.
#[wasm_bindgen]
pub struct PortfolioSphereWasm {
    session: VisualizationSession,
}

#[wasm_bindgen]
impl PortfolioSphereWasm {
    /// Create a session from a config object (camelCase keys).
    ///
    /// `undefined` or `null` selects the defaults. Rejection layouts without
    /// a seed are seeded from `Math.random()`.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> std::result::Result<PortfolioSphereWasm, JsError> {
        let config: SessionConfig = if config.is_undefined() || config.is_null() {
            SessionConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        let config = config.with_seed_if_missing(random_seed());

        Ok(Self {
            session: VisualizationSession::new(config)?,
        })
    }

    /// Create a session with the default configuration.
    #[wasm_bindgen(js_name = withDefaults)]
    pub fn with_defaults() -> std::result::Result<PortfolioSphereWasm, JsError> {
        Ok(Self {
            session: VisualizationSession::new(SessionConfig::default())?,
        })
    }

    /// Replace node content with an array of `{ title, link? }` objects.
    #[wasm_bindgen(js_name = setContent)]
    pub fn set_content(&mut self, content: JsValue) -> std::result::Result<(), JsError> {
        let table: ContentTable = serde_wasm_bindgen::from_value(content)?;
        log::debug!("content table with {} entries", table.len());
        self.session.set_content(table);
        Ok(())
    }

    // =========================================================================
    // Layout and Topology
    // =========================================================================

    /// Get the number of nodes.
    #[wasm_bindgen(js_name = nodeCount)]
    pub fn node_count(&self) -> u32 {
        self.session.node_count() as u32
    }

    /// Get the number of edges.
    #[wasm_bindgen(js_name = edgeCount)]
    pub fn edge_count(&self) -> u32 {
        self.session.edges().len() as u32
    }

    /// Get a zero-copy view of node positions [x0, y0, z0, x1, ...].
    ///
    /// # Safety
    ///
    /// The returned view is invalidated if WASM memory grows.
    /// Use immediately, do not store.
    #[wasm_bindgen(js_name = getPositionsView)]
    pub fn get_positions_view(&self) -> Float32Array {
        unsafe { Float32Array::view(self.session.positions_flat()) }
    }

    /// Get the edge list as [a0, b0, a1, b1, ...].
    #[wasm_bindgen(js_name = getEdges)]
    pub fn get_edges(&self) -> Vec<u32> {
        self.session.edge_pairs_flat()
    }

    /// Get ring neighbors of a node.
    #[wasm_bindgen(js_name = getNeighbors)]
    pub fn get_neighbors(&self, node_id: u32) -> Vec<u32> {
        self.session
            .neighbors(NodeId(node_id))
            .into_iter()
            .map(NodeId::raw)
            .collect()
    }

    /// Find the node nearest to a point in scene space.
    #[wasm_bindgen(js_name = findNearestNode)]
    pub fn find_nearest_node(&self, x: f32, y: f32, z: f32) -> Option<u32> {
        self.session
            .nearest_node(Point3::new(x, y, z))
            .map(NodeId::raw)
    }

    /// Title shown on a node's panel.
    #[wasm_bindgen(js_name = nodeTitle)]
    pub fn node_title(&self, node_id: u32) -> Option<String> {
        self.session.content(NodeId(node_id)).map(|c| c.title)
    }

    /// Link target of a node's panel.
    #[wasm_bindgen(js_name = nodeLink)]
    pub fn node_link(&self, node_id: u32) -> Option<String> {
        self.session.content(NodeId(node_id)).and_then(|c| c.link)
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Fly the camera to a node. Returns false for unknown nodes.
    #[wasm_bindgen(js_name = focusNode)]
    pub fn focus_node(&mut self, node_id: u32) -> bool {
        self.session.focus_node(node_id as usize)
    }

    /// A node panel was clicked.
    #[wasm_bindgen(js_name = onNodeClick)]
    pub fn on_node_click(&mut self, node_id: u32) -> bool {
        self.session.handle_input(InputEvent::NodeClicked { index: node_id })
    }

    /// A navigation button was pressed.
    #[wasm_bindgen(js_name = onNavButton)]
    pub fn on_nav_button(&mut self, node_id: u32) -> bool {
        self.session.handle_input(InputEvent::NavButton { index: node_id })
    }

    /// A wheel event with the raw `deltaY`.
    #[wasm_bindgen(js_name = onWheel)]
    pub fn on_wheel(&mut self, delta_y: f32) -> bool {
        self.session.handle_input(InputEvent::Wheel { delta_y })
    }

    /// Apply an input event object such as `{ type: "wheel", deltaY: 120 }`.
    #[wasm_bindgen(js_name = handleInput)]
    pub fn handle_input(&mut self, event: JsValue) -> std::result::Result<bool, JsError> {
        let event: InputEvent = serde_wasm_bindgen::from_value(event)?;
        Ok(self.session.handle_input(event))
    }

    /// Move the orbit target (from an external orbit control).
    #[wasm_bindgen(js_name = setOrbitTarget)]
    pub fn set_orbit_target(&mut self, x: f32, y: f32, z: f32) {
        self.session.set_orbit_target(Point3::new(x, y, z));
    }

    // =========================================================================
    // Frame Loop
    // =========================================================================

    /// Advance the camera one frame with the configured step.
    pub fn tick(&mut self) {
        self.session.tick();
    }

    /// Advance the camera one frame with an explicit step.
    #[wasm_bindgen(js_name = tickBy)]
    pub fn tick_by(&mut self, step: f32) {
        self.session.tick_by(step);
    }

    /// Check if a focus transition is in flight.
    #[wasm_bindgen(js_name = isTransitioning)]
    pub fn is_transitioning(&self) -> bool {
        self.session.camera().transition.is_some()
    }

    /// Progress of the active transition, if any.
    #[wasm_bindgen(js_name = transitionProgress)]
    pub fn transition_progress(&self) -> Option<f32> {
        self.session.camera().transition.map(|t| t.progress)
    }

    /// Camera position as [x, y, z].
    #[wasm_bindgen(js_name = cameraPosition)]
    pub fn camera_position(&self) -> Vec<f32> {
        self.session.camera().position.to_array().to_vec()
    }

    /// Camera look-at point as [x, y, z].
    #[wasm_bindgen(js_name = cameraLookAt)]
    pub fn camera_look_at(&self) -> Vec<f32> {
        self.session.camera().look_at.to_array().to_vec()
    }

    /// Nodes, edges and camera for the current frame as a JS object.
    #[wasm_bindgen(js_name = renderFrame)]
    pub fn render_frame(&self) -> std::result::Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.session.render_frame())?)
    }
}

impl PortfolioSphereWasm {
    /// Wrap an existing session.
    pub fn from_session(session: VisualizationSession) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &VisualizationSession {
        &self.session
    }
}

/// 64-bit seed from two `Math.random()` draws.
fn random_seed() -> u64 {
    let hi = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
    let lo = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
    (hi << 32) | lo
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::layout::LayoutMode;

    /// Drive the wrapper the way the page does: click a node, run the
    /// animation loop until the transition settles, then scroll.
    #[test]
    fn test_click_animate_scroll_pipeline() {
        let session = VisualizationSession::new(SessionConfig::default()).unwrap();
        let mut sphere = PortfolioSphereWasm::from_session(session);

        assert_eq!(sphere.node_count(), 10);
        assert_eq!(sphere.edge_count(), 10);
        assert_eq!(sphere.get_edges().len(), 20);
        assert_eq!(sphere.get_neighbors(0), vec![1, 9]);
        assert_eq!(sphere.node_title(0).as_deref(), Some("Node 1"));
        assert_eq!(sphere.node_title(10), None);

        assert!(sphere.on_node_click(7));
        assert!(sphere.is_transitioning());
        assert_eq!(sphere.transition_progress(), Some(0.0));

        let mut frames = 0;
        while sphere.is_transitioning() {
            sphere.tick();
            frames += 1;
            assert!(frames <= 20, "transition should settle within 20 frames");
        }
        assert_eq!(frames, 20);

        let node = sphere.session().positions()[7];
        let camera = Point3::from([
            sphere.camera_position()[0],
            sphere.camera_position()[1],
            sphere.camera_position()[2],
        ]);
        assert!((camera.distance_to(node) - 50.0).abs() < 0.1);
        assert_eq!(sphere.camera_look_at(), node.to_array().to_vec());

        // Scrolling forward moves the camera 1 unit per 100 deltaY toward node 7.
        assert!(sphere.on_wheel(100.0));
        let after = sphere.session().camera().position;
        assert!((after.distance_to(node) - 49.0).abs() < 0.1);
        assert_eq!(sphere.find_nearest_node(after.x, after.y, after.z), Some(7));
    }

    /// Nav buttons interrupt an in-flight transition and retarget it.
    #[test]
    fn test_nav_button_retargets_transition() {
        let session = VisualizationSession::new(SessionConfig::default()).unwrap();
        let mut sphere = PortfolioSphereWasm::from_session(session);

        assert!(sphere.on_nav_button(1));
        for _ in 0..10 {
            sphere.tick();
        }
        assert!(sphere.transition_progress().unwrap() > 0.4);

        assert!(sphere.on_nav_button(6));
        assert_eq!(sphere.transition_progress(), Some(0.0));
        assert_eq!(
            sphere.session().camera().transition.unwrap().target_look_at,
            sphere.session().positions()[6]
        );

        assert!(!sphere.on_nav_button(42));
        assert_eq!(sphere.transition_progress(), Some(0.0));
    }

    /// Every frame exposes consistent node, edge and camera data.
    #[test]
    fn test_render_frames_follow_camera() {
        let config = SessionConfig {
            node_count: 6,
            layout: LayoutMode::Rejection {
                min_separation: 60.0,
                max_attempts_per_node: 5000,
                seed: Some(2024),
            },
            ..Default::default()
        };
        let session = VisualizationSession::new(config).unwrap();
        let mut sphere = PortfolioSphereWasm::from_session(session);

        sphere.focus_node(0);
        for _ in 0..20 {
            sphere.tick_by(0.05);
            let frame = sphere.session().render_frame();
            assert_eq!(frame.nodes.len(), 6);
            assert_eq!(frame.edges.len(), 6);
            assert_eq!(frame.camera.position, sphere.session().camera().position);
            for node in &frame.nodes {
                assert!(node.facing.is_finite());
            }
        }
        assert!(!sphere.is_transitioning());
    }
}
