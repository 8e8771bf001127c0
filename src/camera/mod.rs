//! Camera controller: perspective projection plus an animated look-at focus.
//!
//! Two concerns evolve independently on one continuously-held controller:
//!
//! - **Projection**: field of view is derived from canvas height and a
//!   virtual camera distance; the matrix is recomputed when the canvas
//!   resizes or the draw distances change — never merely because the look-at
//!   target moved.
//! - **Focus animation**: a frame-counted linear interpolation from a latched
//!   start point toward the current target, advanced once per frame by the
//!   host's draw callback.
//!
//! Controllers are constructed and passed explicitly — there is no ambient
//! camera singleton, so independent scenes (and tests) each own one.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geom::Point3;

/// Default virtual distance from the camera to the canvas plane, in scene
/// units. Smaller values widen the field of view.
pub const DEFAULT_FOV_DISTANCE: f32 = 800.0;
/// Default near draw distance.
pub const DEFAULT_MIN_DRAW_DISTANCE: f32 = 1.0;
/// Default far draw distance.
pub const DEFAULT_MAX_DRAW_DISTANCE: f32 = 8000.0;
/// Default focus animation length, in frames.
pub const DEFAULT_FOCUS_ANIMATION_FRAMES: u32 = 100;

/// UI-facing camera settings, handed in as one snapshot per frame.
///
/// Sensitivities are held for the host's orbit control; the controller
/// itself only consumes the distances, animation length, and behavior flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraSettings {
    /// Virtual camera distance the field of view is derived from.
    pub fov_distance: f32,
    pub min_draw_distance: f32,
    pub max_draw_distance: f32,
    pub x_sensitivity: f32,
    pub y_sensitivity: f32,
    pub z_sensitivity: f32,
    /// Focus animation length in frames; 0 snaps instantly.
    pub focus_animation_frames: u32,
    /// Whether selecting a vertex also re-targets the camera onto it.
    pub focus_on_selected: bool,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov_distance: DEFAULT_FOV_DISTANCE,
            min_draw_distance: DEFAULT_MIN_DRAW_DISTANCE,
            max_draw_distance: DEFAULT_MAX_DRAW_DISTANCE,
            x_sensitivity: 1.0,
            y_sensitivity: 1.0,
            z_sensitivity: 1.0,
            focus_animation_frames: DEFAULT_FOCUS_ANIMATION_FRAMES,
            focus_on_selected: true,
        }
    }
}

/// Canvas dimensions the projection was computed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }
}

/// The camera: projection state plus focus-animation state.
pub struct CameraController {
    settings: CameraSettings,
    viewport: Option<Viewport>,
    projection: Option<Mat4>,

    eye: Point3,
    look_at: Point3,

    focus_target: Point3,
    focus_start: Option<Point3>,
    focus_frame: u32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(CameraSettings::default())
    }
}

impl CameraController {
    pub fn new(settings: CameraSettings) -> Self {
        Self {
            eye: Point3::new(0.0, 0.0, settings.fov_distance),
            settings,
            viewport: None,
            projection: None,
            look_at: Point3::ORIGIN,
            focus_target: Point3::ORIGIN,
            focus_start: None,
            focus_frame: 0,
        }
    }

    // ========================================================================
    // Projection state
    // ========================================================================

    /// Canvas-resized notification from the host render loop. Recomputes
    /// FOV and aspect ratio and reapplies the projection; the controller
    /// never observes resize itself.
    pub fn handle_canvas_resize(&mut self, width: f32, height: f32) {
        self.viewport = Some(Viewport { width, height });
        self.recompute_projection();
        debug!(width, height, "canvas resized, projection reapplied");
    }

    /// Apply a fresh settings snapshot from the UI. The projection is
    /// recomputed only when the draw distances changed; everything else
    /// (sensitivities, animation length, behavior flags) just takes effect.
    pub fn apply_settings(&mut self, settings: &CameraSettings) {
        let distances_changed = settings.min_draw_distance != self.settings.min_draw_distance
            || settings.max_draw_distance != self.settings.max_draw_distance;
        self.settings = settings.clone();
        if distances_changed {
            self.recompute_projection();
        }
    }

    fn recompute_projection(&mut self) {
        let Some(viewport) = self.viewport else {
            return;
        };
        let fov = self.fov_radians(viewport.height);
        self.projection = Some(Mat4::perspective_rh(
            fov,
            viewport.aspect_ratio(),
            self.settings.min_draw_distance,
            self.settings.max_draw_distance,
        ));
    }

    /// Vertical field of view from the canvas height and the virtual camera
    /// distance. A smaller distance yields a wider angle.
    fn fov_radians(&self, canvas_height: f32) -> f32 {
        2.0 * (canvas_height / 2.0 / self.settings.fov_distance).atan()
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// `None` until the first canvas dimensions arrive.
    pub fn projection_matrix(&self) -> Option<Mat4> {
        self.projection
    }

    /// View matrix from the current eye and look-at. Gated on the same
    /// readiness as the projection so picking and rendering treat the first
    /// unsized frame uniformly; also absent while eye and look-at coincide.
    pub fn view_matrix(&self) -> Option<Mat4> {
        self.projection?;
        if self.eye == self.look_at {
            return None;
        }
        Some(Mat4::look_at_rh(
            self.eye.into(),
            self.look_at.into(),
            Vec3::Y,
        ))
    }

    // ========================================================================
    // Eye / look-at
    // ========================================================================

    /// The host's orbit control owns eye movement and pushes the position in
    /// each frame.
    pub fn set_eye(&mut self, eye: Point3) {
        self.eye = eye;
    }

    pub fn eye(&self) -> Point3 {
        self.eye
    }

    pub fn look_at(&self) -> Point3 {
        self.look_at
    }

    // ========================================================================
    // Focus animation
    // ========================================================================

    /// Request a new focus target.
    ///
    /// Restarts the animation — counter to 0, start latched from the current
    /// look-at — if and only if the target differs from the held one, so
    /// redundant setting updates cannot thrash a running animation.
    pub fn set_focus(&mut self, target: Point3) {
        if target == self.focus_target {
            return;
        }
        debug!(?target, "camera focus retargeted");
        self.focus_start = Some(self.look_at);
        self.focus_target = target;
        self.focus_frame = 0;
    }

    /// Advance the focus animation one frame and return the look-at to apply.
    ///
    /// Interpolates start → target by `clamp(frame / length, 0, 1)`. On the
    /// frame the counter reaches the configured length the animation
    /// completes: the counter resets and the start point re-latches to the
    /// reached target, so a later retarget departs from here instead of
    /// jumping. A configured length of 0 snaps immediately.
    pub fn advance_focus_animation(&mut self) -> Point3 {
        let Some(start) = self.focus_start else {
            return self.look_at;
        };

        let frames = self.settings.focus_animation_frames;
        self.focus_frame += 1;
        let progress = if frames == 0 {
            1.0
        } else {
            (self.focus_frame as f32 / frames as f32).clamp(0.0, 1.0)
        };

        let from = Vec3::from(start);
        let to = Vec3::from(self.focus_target);
        self.look_at = Point3::from(from.lerp(to, progress));

        if self.focus_frame >= frames {
            self.focus_frame = 0;
            self.focus_start = None;
            self.look_at = self.focus_target;
        }

        self.look_at
    }

    pub fn focus_target(&self) -> Point3 {
        self.focus_target
    }

    /// Current animation frame counter; 0 when idle or just completed.
    pub fn focus_frame(&self) -> u32 {
        self.focus_frame
    }

    pub fn is_animating(&self) -> bool {
        self.focus_start.is_some()
    }
}

// ============================================================================
// Tests
// ============================================================================
