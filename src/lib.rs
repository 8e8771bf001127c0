//! # graphscene — interactive graph scene core
//!
//! The embeddable core of a navigable 3D (or 2D) graph explorer: a graph
//! data model with tag/exclusion overlays, a perspective camera with an
//! animated look-at focus, and pointer picking. The host application owns
//! the render surface, the network client, layout, and all form-based UI;
//! this crate owns the numerical and state-machine work in between.
//!
//! ## Design principles
//!
//! 1. **The graphset owns all mutation**: vertices, edges, properties, tags,
//!    exclusions, selection, and hover live in one aggregate; camera and
//!    picking only read vertex data
//! 2. **Clean DTOs**: `Vertex`, `Edge`, `Property` cross all boundaries as
//!    immutable value records built from ingested snapshots
//! 3. **One-way bridge**: the render loop emits value messages outward
//!    through `StateBridge`; the UI pushes changes back in through a
//!    settings snapshot, never by reaching into loop internals
//! 4. **No ambient camera**: controllers are constructed and passed
//!    explicitly, so independent scenes and tests each own one
//!
//! ## Quick start
//!
//! ```rust
//! use graphscene::{GraphSnapshot, Point3, Scene, Vertex};
//!
//! let mut scene = Scene::new();
//! scene.canvas_resized(1280.0, 720.0);
//! scene.replace_data(GraphSnapshot {
//!     vertices: vec![Vertex::new("Q1", "first topic", Point3::ORIGIN)],
//!     ..GraphSnapshot::default()
//! });
//!
//! // each draw callback:
//! let frame = scene.frame();
//! for vertex in &frame.vertices {
//!     // hand position + highlight flags to the render surface
//!     let _ = (vertex.position, vertex.selected, vertex.hovered);
//! }
//! ```
//!
//! Everything here is single-threaded and frame-driven: no locks, no async,
//! no blocking. The only asynchrony is the host's network fetch, which hands
//! a finished [`GraphSnapshot`] to [`Scene::replace_data`] as one atomic
//! replace.

// ============================================================================
// Modules
// ============================================================================

pub mod bridge;
pub mod camera;
pub mod geom;
pub mod graphset;
pub mod model;
pub mod picking;

// ============================================================================
// Re-exports: Geometry
// ============================================================================

pub use geom::{AxisExtent, Point3, SceneExtents};

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    Edge, EdgeIndicator, EntityId, Exclusion, ExclusionPatch, GraphSnapshot, Property, Tag,
    TagKey, TagPatch, Vertex, VERTEX_RADIUS,
};

// ============================================================================
// Re-exports: Aggregate, camera, picking, bridge
// ============================================================================

pub use bridge::StateBridge;
pub use camera::{CameraController, CameraSettings, Viewport};
pub use graphset::Graphset;
pub use picking::trace_ray;

// ============================================================================
// Top-level Scene handle
// ============================================================================

/// One vertex in the per-frame draw list.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawVertex {
    pub id: EntityId,
    pub position: Point3,
    pub selected: bool,
    pub hovered: bool,
}

/// Everything the render surface needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// `None` until the first canvas dimensions arrive.
    pub projection: Option<glam::Mat4>,
    pub eye: Point3,
    pub look_at: Point3,
    /// Visible vertices (non-hidden, non-excluded) with highlight flags.
    pub vertices: Vec<DrawVertex>,
}

/// The primary entry point. A `Scene` wires the graphset, camera, and bridge
/// together and reproduces the render loop's interaction behavior: hover
/// dedup, click select/deselect, and focus-on-selected.
///
/// The host drives it with pointer and resize events plus one
/// [`frame`](Self::frame) call per draw callback. Picking always uses the
/// current frame's camera state.
pub struct Scene {
    pub graph: Graphset,
    pub camera: CameraController,
    pub bridge: StateBridge,
    click_to_fetch: bool,
    interaction_paused: bool,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self::with_settings(CameraSettings::default())
    }

    pub fn with_settings(settings: CameraSettings) -> Self {
        Self {
            graph: Graphset::new(),
            camera: CameraController::new(settings),
            bridge: StateBridge::new(),
            click_to_fetch: false,
            interaction_paused: false,
        }
    }

    // ========================================================================
    // Inbound: data, settings, surface events
    // ========================================================================

    /// Atomic wholesale replace of the loaded dataset.
    pub fn replace_data(&mut self, snapshot: GraphSnapshot) {
        self.graph.replace(snapshot);
    }

    pub fn canvas_resized(&mut self, width: f32, height: f32) {
        self.camera.handle_canvas_resize(width, height);
    }

    pub fn apply_camera_settings(&mut self, settings: &CameraSettings) {
        self.camera.apply_settings(settings);
    }

    /// Explicit focus-target request from the host.
    pub fn focus_camera_on(&mut self, point: Point3) {
        self.camera.set_focus(point);
    }

    /// While paused (host modal UI open), pointer events are ignored.
    pub fn set_interaction_paused(&mut self, paused: bool) {
        self.interaction_paused = paused;
    }

    pub fn interaction_paused(&self) -> bool {
        self.interaction_paused
    }

    pub fn click_to_fetch(&self) -> bool {
        self.click_to_fetch
    }

    /// Flip the "click selects vs. click fetches more data" flag and notify
    /// the host.
    pub fn toggle_click_to_fetch(&mut self) {
        self.click_to_fetch = !self.click_to_fetch;
        self.bridge.dispatch_click_to_fetch_toggle();
    }

    // ========================================================================
    // Per-frame
    // ========================================================================

    /// Advance the camera animation and assemble the frame packet for the
    /// render surface.
    pub fn frame(&mut self) -> Frame {
        let look_at = self.camera.advance_focus_animation();
        let vertices = self
            .graph
            .visible_vertices()
            .map(|v| DrawVertex {
                id: v.id.clone(),
                position: v.position,
                selected: self.graph.is_selected(v),
                hovered: self.graph.is_hovered(v),
            })
            .collect();
        Frame {
            projection: self.camera.projection_matrix(),
            eye: self.camera.eye(),
            look_at,
            vertices,
        }
    }

    // ========================================================================
    // Pointer interaction
    // ========================================================================

    /// Hover tracking. Dispatches a hover change only when the target under
    /// the pointer actually changed: no target with no held state, or the
    /// same target again, does nothing.
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        if self.interaction_paused {
            return;
        }
        let target = self.vertex_under_pointer(x, y).map(|v| v.id.clone());

        match (&target, self.graph.hovered_id()) {
            (None, None) => return,
            (Some(t), Some(held)) if t == held => return,
            _ => {}
        }

        self.graph.set_hovered(target.clone());
        self.bridge.dispatch_hovered(target);
    }

    /// Click handling. Clicking empty space does nothing; clicking the
    /// selected vertex deselects it; clicking any other vertex clears hover,
    /// selects it, and — when the focus-on-selected setting is on — both
    /// re-targets the camera and reports the new focus point.
    pub fn pointer_clicked(&mut self, x: f32, y: f32) {
        if self.interaction_paused {
            return;
        }
        let Some(target) = self.vertex_under_pointer(x, y) else {
            return;
        };
        let id = target.id.clone();
        let position = target.position;

        if self.graph.selected_id() == Some(&id) {
            self.graph.set_selected(None);
            self.bridge.dispatch_selected(None);
        } else {
            self.graph.set_hovered(None);
            self.bridge.dispatch_hovered(None);
            self.graph.set_selected(Some(id.clone()));
            self.bridge.dispatch_selected(Some(id));
            if self.camera.settings().focus_on_selected {
                self.camera.set_focus(position);
                self.bridge.dispatch_focus(position);
            }
        }
    }

    /// The visible vertex under the pointer, if any. When overlapping
    /// vertices both intersect the ray, the later one in draw order wins.
    fn vertex_under_pointer(&self, x: f32, y: f32) -> Option<&Vertex> {
        let mut hit = None;
        for vertex in self.graph.visible_vertices() {
            if picking::trace_ray(x, y, &self.camera, vertex.position, VERTEX_RADIUS).is_some() {
                hit = Some(vertex);
            }
        }
        hit
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// At most one exclusion may exist per entity; a duplicate create is a
    /// host-side logic bug surfaced back to the caller.
    #[error("exclusion already exists for entity {0}")]
    DuplicateExclusion(EntityId),

    #[error("snapshot decode error: {0}")]
    Snapshot(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
