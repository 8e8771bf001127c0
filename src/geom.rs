//! Geometry primitives shared by the graph model, camera, and picking.
//!
//! `Point3` is the value type that crosses boundaries (snapshots, focus
//! targets, pick results); matrix math happens on `glam` types, with `From`
//! conversions at the seam.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A point in 2D or 3D space.
///
/// `z` is optional in serialized form and defaults to 0 so 2D datasets load
/// without a z coordinate. Value semantics: comparison by `PartialEq` is how
/// focus-target changes are detected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl Point3 {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point3) -> f32 {
        Vec3::from(*self).distance(Vec3::from(*other))
    }
}

impl From<Point3> for Vec3 {
    fn from(p: Point3) -> Self {
        Vec3::new(p.x, p.y, p.z)
    }
}

impl From<Vec3> for Point3 {
    fn from(v: Vec3) -> Self {
        Self { x: v.x, y: v.y, z: v.z }
    }
}

/// Minimum/maximum bounds along one axis.
///
/// `diff` is the padded span used to size bounding boxes: `max - min` plus the
/// shared vertex radius for non-empty input, 0 for empty input (see
/// `Graphset::extents_of`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisExtent {
    pub min: f32,
    pub max: f32,
    pub diff: f32,
}

/// Per-axis bounding extents over a vertex set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneExtents {
    pub x: AxisExtent,
    pub y: AxisExtent,
    pub z: AxisExtent,
}

impl SceneExtents {
    /// True when no vertex contributed: mins and maxes are still the
    /// infinite sentinels. Callers must guard this before sizing geometry.
    pub fn is_empty(&self) -> bool {
        !self.x.min.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_equality_detects_changes() {
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(1.0, 2.0, 3.0);
        let c = Point3::new(1.0, 2.0, 3.5);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_serde_z_defaults_to_zero() {
        let p: Point3 = serde_json::from_str(r#"{"x": 4.0, "y": -2.0}"#).unwrap();
        assert_eq!(p, Point3::new(4.0, -2.0, 0.0));
    }

    #[test]
    fn test_vec3_round_trip() {
        let p = Point3::new(0.5, -1.5, 9.0);
        assert_eq!(Point3::from(Vec3::from(p)), p);
    }
}
