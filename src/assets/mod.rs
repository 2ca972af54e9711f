//! Image references used as top-face textures.

/// Raster decode and SVG rasterization.
pub mod decode;
/// Request/pump image store and loaders.
pub mod store;
