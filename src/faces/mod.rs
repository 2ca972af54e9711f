/// Per-frame faces and painter's ordering.
pub mod build;
