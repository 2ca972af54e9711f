//! CPU rasterization of sorted faces.

/// Fill, stroke, and textured drawing of faces.
pub mod painter;
/// Frame pixmap and readback.
pub mod surface;
/// Affine solver for texture triangles.
pub mod texture;
