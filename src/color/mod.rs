/// CSS color parsing, shading, and formatting.
pub mod css;
