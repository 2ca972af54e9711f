//! Draws sorted faces onto a `vello_cpu` context.
//!
//! Painting is purely additive; nothing here keeps state between frames.

use crate::assets::store::{ImageStore, TextureImage};
use crate::faces::build::Face;
use crate::foundation::config::PreviewConfig;
use crate::foundation::core::{Affine, Point, Viewport};
use crate::render::surface::{affine_to_cpu, polygon_to_cpu};
use crate::render::texture::triangle_transform;

/// Per-frame paint parameters in physical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PaintStyle {
    pub face_alpha: f64,
    pub outline_rgba: [u8; 4],
    pub outline_width: f64,
}

impl PaintStyle {
    pub fn from_config(cfg: &PreviewConfig, viewport: Viewport) -> Self {
        Self {
            face_alpha: cfg.face_alpha.clamp(0.0, 1.0),
            outline_rgba: cfg.outline_rgba,
            outline_width: cfg.outline_width * viewport.scale(),
        }
    }
}

/// The two triangles a textured quad is split into; they share the 0-2 diagonal.
const QUAD_TRIANGLES: [[usize; 3]; 2] = [[0, 1, 2], [0, 2, 3]];

/// Paint `faces` in slice order (callers sort back to front first).
///
/// `opacity` scales the whole frame. Returns the number of faces drawn with a texture.
pub fn paint_faces(
    ctx: &mut vello_cpu::RenderContext,
    faces: &[Face],
    images: &ImageStore,
    style: &PaintStyle,
    opacity: f64,
) -> usize {
    let opacity = if opacity.is_finite() {
        opacity.clamp(0.0, 1.0)
    } else {
        1.0
    };
    if opacity <= 0.0 || faces.is_empty() {
        return 0;
    }

    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    let layered = opacity < 1.0;
    if layered {
        ctx.push_opacity_layer(opacity as f32);
    }

    let mut textured = 0usize;
    for face in faces {
        if face.points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            continue;
        }
        let image = face
            .texture
            .as_ref()
            .and_then(|t| images.texture(&t.key).map(|img| (t, img)));
        match image {
            Some((tex, img)) => {
                paint_textured(ctx, face, &tex.uv, img, style);
                textured += 1;
            }
            None => paint_flat(ctx, face, style),
        }
        stroke_outline(ctx, face, style);
    }

    if layered {
        ctx.pop_layer();
    }
    textured
}

fn paint_flat(ctx: &mut vello_cpu::RenderContext, face: &Face, style: &PaintStyle) {
    let [r, g, b, a] = face.color.to_rgba8(style.face_alpha);
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
    ctx.fill_path(&polygon_to_cpu(&face.points));
}

fn paint_textured(
    ctx: &mut vello_cpu::RenderContext,
    face: &Face,
    uv: &[Point; 4],
    img: &TextureImage,
    style: &PaintStyle,
) {
    let layered = style.face_alpha < 1.0;
    if layered {
        ctx.push_opacity_layer(style.face_alpha as f32);
    }

    let src = uv.map(|p| Point::new(p.x * img.width, p.y * img.height));
    for [i, j, k] in QUAD_TRIANGLES {
        let dst = [face.points[i], face.points[j], face.points[k]];
        let transform: Affine = triangle_transform([src[i], src[j], src[k]], dst);

        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.push_clip_layer(&polygon_to_cpu(&dst));
        ctx.set_transform(affine_to_cpu(transform));
        ctx.set_paint(img.paint.clone());
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, img.width, img.height));
        ctx.pop_layer();
    }

    if layered {
        ctx.pop_layer();
    }
}

fn stroke_outline(ctx: &mut vello_cpu::RenderContext, face: &Face, style: &PaintStyle) {
    let [r, g, b, a] = style.outline_rgba;
    if a == 0 || style.outline_width <= 0.0 {
        return;
    }
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
    ctx.set_stroke(vello_cpu::kurbo::Stroke::new(style.outline_width));
    ctx.stroke_path(&polygon_to_cpu(&face.points));
}

#[cfg(test)]
#[path = "../../tests/unit/render/painter.rs"]
mod tests;
