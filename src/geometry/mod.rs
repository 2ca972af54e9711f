/// Axis-aligned bounds, overlap tests, and directional offsets.
pub mod bounds;
/// 3D vector algebra.
pub mod vec3;
