//! Canvas input and its 3D layout.

/// Stacking and conversion to renderer-space boxes.
pub mod layout;
/// Canvas object input contract.
pub mod model;
