//! Orbit camera and perspective projection.
//!
//! The camera is rebuilt from `(center, radius, yaw, pitch)` every frame; nothing here keeps
//! state between calls.

use crate::foundation::core::{Point, Viewport};
use crate::geometry::vec3::Vec3;

/// Smallest forward-axis depth used for the perspective divide.
pub const MIN_PROJECTION_DEPTH: f64 = 0.001;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub pos: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    pub forward: Vec3,
    /// Vertical field of view in radians.
    pub fov: f64,
}

/// Build an orbit camera looking at `center` from `radius` away.
///
/// `right` falls back to world X when the view direction is (nearly) vertical.
pub fn create_camera(center: Vec3, radius: f64, yaw: f64, pitch: f64, fov_deg: f64) -> Camera {
    let (sy, cy) = yaw.sin_cos();
    let (sp, cp) = pitch.sin_cos();
    let pos = center + Vec3::new(cy * cp, sy * cp, sp) * radius;
    let forward = (center - pos).normalize_or(-Vec3::X);

    let r = forward.cross(Vec3::Z);
    let right = if r.length() < 1e-6 {
        Vec3::X
    } else {
        r.normalize()
    };
    let up = right.cross(forward);

    Camera {
        pos,
        right,
        up,
        forward,
        fov: fov_deg.to_radians(),
    }
}

/// Project a world point into normalized device coordinates.
///
/// The vertical half-extent of the view maps to `1.0`. Both axes are negated so that `+y` points
/// down the screen like a raster surface.
pub fn project_perspective(point: Vec3, camera: &Camera) -> Point {
    let rel = point - camera.pos;
    let x = rel.dot(camera.right);
    let y = rel.dot(camera.up);
    let depth = rel.dot(camera.forward).max(MIN_PROJECTION_DEPTH);
    let f = 1.0 / (camera.fov * 0.5).tan();
    let s = f / depth;
    Point::new(-x * s, -y * s)
}

/// Project straight into physical pixels of `viewport`.
pub fn project_to_screen(point: Vec3, camera: &Camera, viewport: Viewport) -> Point {
    viewport.to_screen(project_perspective(point, camera))
}

/// Signed distance along the view direction. Only meaningful for ordering.
pub fn depth_for_point(point: Vec3, camera: &Camera) -> f64 {
    (point - camera.pos).dot(camera.forward)
}

pub fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a).normalize()
}

pub fn face_center(points: &[Vec3]) -> Vec3 {
    if points.is_empty() {
        return Vec3::ZERO;
    }
    let sum = points.iter().fold(Vec3::ZERO, |acc, p| acc + *p);
    sum * (1.0 / points.len() as f64)
}

/// Back-face test: true when the face normal points toward the camera.
pub fn is_face_visible(normal: Vec3, center: Vec3, camera: &Camera) -> bool {
    let to_camera = (camera.pos - center).normalize();
    normal.dot(to_camera) > 0.0
}

#[cfg(test)]
#[path = "../../tests/unit/camera/orbit.rs"]
mod tests;
