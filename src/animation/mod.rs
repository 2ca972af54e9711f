//! Time-based preview state.

/// Scene-wide open/close timeline.
pub mod convergence;
/// Easing curves.
pub mod ease;
/// Overlay opacity fade.
pub mod fade;
/// Per-object stack height smoothing.
pub mod zsmooth;
