/// Orbit camera, projection, and visibility tests.
pub mod orbit;
