//! Shared primitives: geometry re-exports, errors, and configuration.

/// Tunable constants and their JSON form.
pub mod config;
/// Viewport and timing primitives.
pub mod core;
/// Error type used at every fallible boundary.
pub mod error;
