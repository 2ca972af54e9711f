//! Flat canvas arrangement to stacked 3D boxes.
//!
//! The output is a full replacement every time the arrangement changes; nothing is patched in
//! place.

use crate::color::css::Rgb;
use crate::foundation::config::PreviewConfig;
use crate::foundation::core::{Point, Rect};
use crate::geometry::bounds::{bounds_of_rects, rects_overlap};
use crate::geometry::vec3::Vec3;
use crate::scene::model::{CanvasObject, ObjectSubtype};

#[derive(Clone, Debug, PartialEq)]
/// Canvas object with its resolved resting height, in millimeters.
pub struct StackedObject {
    /// The object this entry was derived from.
    pub source: CanvasObject,
    /// Unrotated width (mm).
    pub width: f64,
    /// Unrotated depth (mm).
    pub depth: f64,
    /// Stacked height (mm); finite and non-negative, not floored.
    pub height: f64,
    /// Resting height of the object's underside (mm).
    pub base_z: f64,
    /// Rotated, axis-aligned footprint (mm).
    pub footprint: Rect,
}

#[derive(Clone, Debug, PartialEq)]
/// Renderer-space box.
pub struct SceneBox {
    /// Source object identifier.
    pub id: String,
    /// Box center in world units.
    pub center: Vec3,
    /// Half extents along world X, Y, Z before yaw.
    pub half: Vec3,
    /// Rotation about the vertical axis (radians).
    pub yaw: f64,
    /// Parsed fill color.
    pub color: Rgb,
    /// Image reference for the top face.
    pub image: Option<String>,
}

impl SceneBox {
    pub fn base_z(&self) -> f64 {
        self.center.z - self.half.z
    }

    pub fn top_z(&self) -> f64 {
        self.center.z + self.half.z
    }

    pub fn footprint_center(&self) -> Point {
        Point::new(self.center.x, self.center.y)
    }

    /// Four base corners then four top corners, both in the same winding.
    pub fn corners(&self) -> [Vec3; 8] {
        let (s, c) = self.yaw.sin_cos();
        let local = [
            (-self.half.x, -self.half.y),
            (self.half.x, -self.half.y),
            (self.half.x, self.half.y),
            (-self.half.x, self.half.y),
        ];
        let base = self.base_z();
        let top = self.top_z();
        let mut out = [Vec3::ZERO; 8];
        for (i, (lx, ly)) in local.into_iter().enumerate() {
            let x = self.center.x + lx * c - ly * s;
            let y = self.center.y + lx * s + ly * c;
            out[i] = Vec3::new(x, y, base);
            out[i + 4] = Vec3::new(x, y, top);
        }
        out
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Result of [`build_scene_layout`].
pub struct SceneLayout {
    /// Stacked objects in input order (filtered).
    pub stacked: Vec<StackedObject>,
    /// One box per stacked object, same order.
    pub boxes: Vec<SceneBox>,
    /// Anchor rectangle in canvas mm; `None` for an empty scene.
    pub anchor: Option<Rect>,
    /// Bounds of every footprint in canvas mm.
    pub bounds: Option<Rect>,
    /// Look-at point of the orbit camera.
    pub camera_target: Vec3,
    /// Baseline orbit distance framing the whole stack.
    pub orbit_distance: f64,
    /// Tallest stack top in world units.
    pub max_stack_height: f64,
}

impl SceneLayout {
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn empty(cfg: &PreviewConfig) -> Self {
        Self {
            stacked: Vec::new(),
            boxes: Vec::new(),
            anchor: None,
            bounds: None,
            camera_target: Vec3::ZERO,
            orbit_distance: cfg.baseline_distance,
            max_stack_height: 0.0,
        }
    }
}

/// Greedy stacking in input order.
///
/// Each object rests on the highest top among earlier objects whose footprint overlaps its own.
/// Results depend on input order.
pub fn stack_objects(objects: &[CanvasObject]) -> Vec<StackedObject> {
    let mut out: Vec<StackedObject> = Vec::new();
    for obj in objects.iter().filter(|o| o.is_previewable()) {
        let footprint = obj.footprint();
        let height = if obj.height.is_finite() {
            obj.height.max(0.0)
        } else {
            0.0
        };
        let base_z = out
            .iter()
            .filter(|prev| rects_overlap(prev.footprint, footprint))
            .map(|prev| prev.base_z + prev.height)
            .fold(0.0, f64::max);
        out.push(StackedObject {
            source: obj.clone(),
            width: obj.width,
            depth: obj.depth,
            height,
            base_z,
            footprint,
        });
    }
    out
}

#[tracing::instrument(skip_all, fields(objects = objects.len()))]
pub fn build_scene_layout(objects: &[CanvasObject], cfg: &PreviewConfig) -> SceneLayout {
    let stacked = stack_objects(objects);
    if stacked.is_empty() {
        return SceneLayout::empty(cfg);
    }

    let bounds = bounds_of_rects(stacked.iter().map(|s| s.footprint));
    let board_bounds = bounds_of_rects(
        stacked
            .iter()
            .filter(|s| s.source.subtype == ObjectSubtype::Board)
            .map(|s| s.footprint),
    );
    let anchor = board_bounds.or(bounds);
    let anchor_center = anchor.map_or(Point::ZERO, |a| a.center());

    let scale = cfg.mm_to_world;
    let boxes: Vec<SceneBox> = stacked
        .iter()
        .map(|s| {
            let c = s.footprint.center();
            let half_h = s.height.max(cfg.min_thickness_mm) * scale * 0.5;
            SceneBox {
                id: s.source.id.clone(),
                center: Vec3::new(
                    (c.x - anchor_center.x) * scale,
                    (c.y - anchor_center.y) * scale,
                    s.base_z * scale + half_h,
                ),
                half: Vec3::new(s.width * scale * 0.5, s.depth * scale * 0.5, half_h),
                yaw: f64::from(s.source.quarter_turns()) * std::f64::consts::FRAC_PI_2,
                color: s
                    .source
                    .color
                    .as_deref()
                    .map_or(crate::color::css::FALLBACK_GRAY, Rgb::parse_or_gray),
                image: s.source.image.clone().filter(|i| !i.trim().is_empty()),
            }
        })
        .collect();

    let max_stack_height = boxes.iter().map(SceneBox::top_z).fold(0.0, f64::max);
    let (anchor_w, anchor_d) = anchor.map_or((0.0, 0.0), |a| (a.width(), a.height()));
    let span = (anchor_w * scale).max(anchor_d * scale).max(max_stack_height);
    let orbit_distance = cfg
        .baseline_distance
        .max(2.0 * span + cfg.distance_margin);

    tracing::debug!(
        boxes = boxes.len(),
        max_stack_height,
        orbit_distance,
        "scene layout built"
    );

    SceneLayout {
        stacked,
        boxes,
        anchor,
        bounds,
        camera_target: Vec3::new(0.0, 0.0, max_stack_height * 0.5),
        orbit_distance,
        max_stack_height,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/layout.rs"]
mod tests;
