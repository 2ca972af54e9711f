//! Per-frame face construction and painter's ordering.

use std::cmp::Ordering;

use crate::camera::orbit::{
    Camera, depth_for_point, face_center, face_normal, is_face_visible, project_to_screen,
};
use crate::color::css::Rgb;
use crate::foundation::config::PreviewConfig;
use crate::foundation::core::{Point, Viewport};
use crate::geometry::vec3::Vec3;
use crate::scene::layout::SceneBox;

/// Depth differences below this are treated as ties.
pub const DEPTH_TIE_EPSILON: f64 = 1e-4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaceKind {
    Top,
    Bottom,
    Side,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FaceTexture {
    pub key: String,
    /// Normalized texture coordinates, one per face point.
    pub uv: [Point; 4],
}

#[derive(Clone, Debug, PartialEq)]
pub struct Face {
    /// Projected points in physical pixels.
    pub points: [Point; 4],
    pub world_points: [Vec3; 4],
    /// Mean view depth of the corners.
    pub depth: f64,
    /// Farthest corner along the view direction.
    pub max_depth: f64,
    pub kind: FaceKind,
    /// Shaded fill color.
    pub color: Rgb,
    pub shade: f64,
    pub texture: Option<FaceTexture>,
    /// Emission order; final tie-break of the sort.
    pub order: usize,
    pub box_index: usize,
}

/// Answers whether an image reference is ready to be used as a texture.
pub trait TextureLookup {
    fn has_texture(&self, key: &str) -> bool;
}

impl TextureLookup for std::collections::HashSet<String> {
    fn has_texture(&self, key: &str) -> bool {
        self.contains(key)
    }
}

/// Lookup for callers that never texture.
pub struct NoTextures;

impl TextureLookup for NoTextures {
    fn has_texture(&self, _key: &str) -> bool {
        false
    }
}

const TOP_UV: [Point; 4] = [
    Point::new(0.0, 0.0),
    Point::new(1.0, 0.0),
    Point::new(1.0, 1.0),
    Point::new(0.0, 1.0),
];

/// Build every camera-facing face of `boxes`. Back faces are culled.
pub fn build_faces(
    boxes: &[SceneBox],
    camera: &Camera,
    viewport: Viewport,
    cfg: &PreviewConfig,
    textures: &dyn TextureLookup,
) -> Vec<Face> {
    let light = cfg.light_dir.normalize_or(Vec3::Z);
    let mut faces = Vec::with_capacity(boxes.len() * 3);
    let mut order = 0usize;

    for (box_index, b) in boxes.iter().enumerate() {
        let c = b.corners();
        let mut quads: Vec<(FaceKind, [Vec3; 4])> = Vec::with_capacity(6);
        quads.push((FaceKind::Top, [c[4], c[5], c[6], c[7]]));
        quads.push((FaceKind::Bottom, [c[3], c[2], c[1], c[0]]));
        for i in 0..4 {
            let j = (i + 1) % 4;
            quads.push((FaceKind::Side, [c[i], c[j], c[j + 4], c[i + 4]]));
        }

        for (kind, world) in quads {
            let center = face_center(&world);
            let mut normal = face_normal(world[0], world[1], world[2]);
            if normal.dot(center - b.center) < 0.0 {
                normal = -normal;
            }
            if !is_face_visible(normal, center, camera) {
                continue;
            }

            let shade = match kind {
                FaceKind::Top => cfg.top_shade,
                FaceKind::Bottom => cfg.bottom_shade,
                FaceKind::Side => 0.5 + 0.5 * normal.dot(light).max(0.0),
            };
            let texture = match (kind, b.image.as_deref()) {
                (FaceKind::Top, Some(key)) if textures.has_texture(key) => Some(FaceTexture {
                    key: key.to_owned(),
                    uv: TOP_UV,
                }),
                _ => None,
            };

            let depths = world.map(|p| depth_for_point(p, camera));
            let max_depth = depths.iter().copied().fold(f64::MIN, f64::max);
            let depth = depths.iter().sum::<f64>() / 4.0;

            faces.push(Face {
                points: world.map(|p| project_to_screen(p, camera, viewport)),
                world_points: world,
                depth,
                max_depth,
                kind,
                color: b.color.shade(shade),
                shade,
                texture,
                order,
                box_index,
            });
            order += 1;
        }
    }
    faces
}

/// Painter's comparison: farthest first, epsilon ties by mean depth, then emission order.
pub fn paint_order(a: &Face, b: &Face) -> Ordering {
    if (a.max_depth - b.max_depth).abs() > DEPTH_TIE_EPSILON {
        return b.max_depth.total_cmp(&a.max_depth);
    }
    if (a.depth - b.depth).abs() > DEPTH_TIE_EPSILON {
        return b.depth.total_cmp(&a.depth);
    }
    a.order.cmp(&b.order)
}

/// Sort faces back to front.
///
/// The epsilon comparison is not transitive, so this uses a stable insertion sort rather than
/// `sort_by`, which may panic on inconsistent orderings.
pub fn sort_faces(faces: &mut [Face]) {
    for i in 1..faces.len() {
        let mut j = i;
        while j > 0 && paint_order(&faces[j - 1], &faces[j]) == Ordering::Greater {
            faces.swap(j - 1, j);
            j -= 1;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/faces/build.rs"]
mod tests;
