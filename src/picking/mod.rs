//! Pointer picking: convert a 2D pointer position into a world-space ray and
//! test it against vertex bounding spheres.
//!
//! The un-projection inverts the camera's combined projection·view matrix;
//! the intersection itself is the closed-form ray/sphere quadratic, so hits
//! stay exact at grazing angles.

use glam::Vec3;

use crate::camera::CameraController;
use crate::geom::Point3;

/// Trace the pointer ray against one candidate vertex.
///
/// `pointer_x`/`pointer_y` are canvas pixel coordinates; the canvas
/// dimensions come from the camera's viewport so the pick always uses the
/// same dimensions the projection was computed from. Returns the nearest
/// intersection point on the sphere (`center`, `radius`), or `None` when the
/// ray misses — or when the camera's matrices are not yet initialized (the
/// first frame after construction), which short-circuits instead of
/// inverting an empty matrix.
pub fn trace_ray(
    pointer_x: f32,
    pointer_y: f32,
    camera: &CameraController,
    center: Point3,
    radius: f32,
) -> Option<Point3> {
    let viewport = camera.viewport()?;
    let projection = camera.projection_matrix()?;
    let view = camera.view_matrix()?;

    // pointer pixels → normalized device coordinates in [-1, 1], flipping Y
    // (screen-space Y grows downward, device-space Y grows upward)
    let ndc_x = (pointer_x / viewport.width) * 2.0 - 1.0;
    let ndc_y = 1.0 - (pointer_y / viewport.height) * 2.0;

    // un-project a far-plane point back to world space; the perspective
    // divide happens inside project_point3
    let inverse_view_projection = (projection * view).inverse();
    let world = inverse_view_projection.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));
    if !world.is_finite() {
        return None;
    }

    let eye = Vec3::from(camera.eye());
    let direction = (world - eye).normalize_or_zero();
    if direction == Vec3::ZERO {
        return None;
    }

    ray_sphere_intersection(eye, direction, center.into(), radius).map(Point3::from)
}

/// Nearest intersection of the ray `origin + t·direction` (direction
/// normalized) with a sphere, at `t >= 0`. Solves `t² + 2bt + c = 0`.
fn ray_sphere_intersection(
    origin: Vec3,
    direction: Vec3,
    center: Vec3,
    radius: f32,
) -> Option<Vec3> {
    let oc = origin - center;
    let b = oc.dot(direction);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    let near = -b - sqrt_d;
    let t = if near >= 0.0 { near } else { -b + sqrt_d };
    if t < 0.0 {
        return None;
    }
    Some(origin + direction * t)
}

// ============================================================================
// Tests
// ============================================================================
