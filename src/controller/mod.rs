//! Host-facing preview controller.

/// Callbacks the controller makes into its host.
pub mod host;
/// Frame pipeline and state ownership.
pub mod preview;
