use std::sync::Arc;

use super::*;
use crate::assets::decode::PreparedImage;
use crate::color::css::Rgb;
use crate::faces::build::{FaceKind, FaceTexture};
use crate::geometry::vec3::Vec3;
use crate::render::surface::FrameSurface;

fn quad(x0: f64, y0: f64, x1: f64, y1: f64, color: Rgb) -> Face {
    Face {
        points: [
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
        ],
        world_points: [Vec3::ZERO; 4],
        depth: 1.0,
        max_depth: 1.0,
        kind: FaceKind::Top,
        color,
        shade: 1.0,
        texture: None,
        order: 0,
        box_index: 0,
    }
}

fn opaque_no_outline() -> PaintStyle {
    PaintStyle {
        face_alpha: 1.0,
        outline_rgba: [0, 0, 0, 0],
        outline_width: 0.0,
    }
}

fn surface(size: f64) -> FrameSurface {
    FrameSurface::new(Viewport::new(size, size, 1.0)).unwrap()
}

#[test]
fn style_scales_outline_by_dpr() {
    let cfg = PreviewConfig::default();
    let style = PaintStyle::from_config(&cfg, Viewport::new(10.0, 10.0, 2.0));
    assert_eq!(style.outline_width, 2.0);
    assert_eq!(style.outline_rgba, cfg.outline_rgba);
}

#[test]
fn flat_face_is_filled() {
    let mut s = surface(20.0);
    let faces = [quad(0.0, 0.0, 20.0, 20.0, Rgb::new(255, 0, 0))];
    let store = ImageStore::new();
    s.draw([0, 0, 0, 0], |ctx| {
        assert_eq!(paint_faces(ctx, &faces, &store, &opaque_no_outline(), 1.0), 0);
    });
    assert_eq!(s.pixel(10, 10), Some([255, 0, 0, 255]));
}

#[test]
fn later_faces_overdraw_earlier_ones() {
    let mut s = surface(20.0);
    let faces = [
        quad(0.0, 0.0, 20.0, 20.0, Rgb::new(255, 0, 0)),
        quad(0.0, 0.0, 10.0, 20.0, Rgb::new(0, 0, 255)),
    ];
    let store = ImageStore::new();
    s.draw([0, 0, 0, 0], |ctx| {
        paint_faces(ctx, &faces, &store, &opaque_no_outline(), 1.0);
    });
    assert_eq!(s.pixel(5, 10), Some([0, 0, 255, 255]));
    assert_eq!(s.pixel(15, 10), Some([255, 0, 0, 255]));
}

#[test]
fn zero_opacity_draws_nothing() {
    let mut s = surface(10.0);
    let faces = [quad(0.0, 0.0, 10.0, 10.0, Rgb::new(255, 255, 255))];
    let store = ImageStore::new();
    s.draw([0, 0, 0, 0], |ctx| {
        paint_faces(ctx, &faces, &store, &opaque_no_outline(), 0.0);
    });
    assert_eq!(s.pixel(5, 5), Some([0, 0, 0, 0]));
}

#[test]
fn partial_opacity_reduces_alpha() {
    let mut s = surface(10.0);
    let faces = [quad(0.0, 0.0, 10.0, 10.0, Rgb::new(255, 255, 255))];
    let store = ImageStore::new();
    s.draw([0, 0, 0, 0], |ctx| {
        paint_faces(ctx, &faces, &store, &opaque_no_outline(), 0.5);
    });
    let a = s.pixel(5, 5).unwrap()[3];
    assert!((120..=136).contains(&a), "alpha {a}");
}

#[test]
fn outline_darkens_edges() {
    let mut s = surface(20.0);
    let faces = [quad(4.0, 4.0, 16.0, 16.0, Rgb::new(255, 255, 255))];
    let store = ImageStore::new();
    let style = PaintStyle {
        face_alpha: 1.0,
        outline_rgba: [0, 0, 0, 255],
        outline_width: 2.0,
    };
    s.draw([0, 0, 0, 0], |ctx| {
        paint_faces(ctx, &faces, &store, &style, 1.0);
    });
    let edge = s.pixel(4, 10).unwrap();
    let inside = s.pixel(10, 10).unwrap();
    assert!(edge[0] < inside[0]);
}

#[test]
fn textured_face_samples_image() {
    let mut store = ImageStore::new();
    let green = PreparedImage {
        width: 2,
        height: 2,
        rgba8_premul: Arc::new([0u8, 255, 0, 255].repeat(4)),
    };
    store.insert_ready("top.png", &green).unwrap();

    let mut face = quad(0.0, 0.0, 20.0, 20.0, Rgb::new(255, 0, 0));
    face.texture = Some(FaceTexture {
        key: "top.png".to_owned(),
        uv: [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ],
    });

    let mut s = surface(20.0);
    let faces = [face];
    s.draw([0, 0, 0, 0], |ctx| {
        assert_eq!(paint_faces(ctx, &faces, &store, &opaque_no_outline(), 1.0), 1);
    });
    assert_eq!(s.pixel(15, 4), Some([0, 255, 0, 255]));
    assert_eq!(s.pixel(4, 15), Some([0, 255, 0, 255]));
}

#[test]
fn missing_texture_falls_back_to_flat() {
    let mut face = quad(0.0, 0.0, 10.0, 10.0, Rgb::new(0, 0, 255));
    face.texture = Some(FaceTexture {
        key: "gone.png".to_owned(),
        uv: [Point::ZERO; 4],
    });
    let mut s = surface(10.0);
    let store = ImageStore::new();
    let faces = [face];
    s.draw([0, 0, 0, 0], |ctx| {
        assert_eq!(paint_faces(ctx, &faces, &store, &opaque_no_outline(), 1.0), 0);
    });
    assert_eq!(s.pixel(5, 5), Some([0, 0, 255, 255]));
}

#[test]
fn non_finite_points_are_skipped() {
    let mut face = quad(0.0, 0.0, 10.0, 10.0, Rgb::new(0, 0, 255));
    face.points[2] = Point::new(f64::NAN, 1.0);
    let mut s = surface(10.0);
    let store = ImageStore::new();
    let faces = [face];
    s.draw([0, 0, 0, 0], |ctx| {
        paint_faces(ctx, &faces, &store, &opaque_no_outline(), 1.0);
    });
    assert_eq!(s.pixel(5, 5), Some([0, 0, 0, 0]));
}
