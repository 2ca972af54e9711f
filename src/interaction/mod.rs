/// Camera distance fitting.
pub mod fit;
/// View angles and pointer handling.
pub mod orbit;
