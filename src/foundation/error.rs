/// Convenience result type used across the preview crate.
pub type PreviewResult<T> = Result<T, PreviewError>;

/// Top-level error taxonomy for the boundaries of the preview core.
///
/// Per-frame geometry and painting never produce these; degenerate input there resolves to a
/// fallback value instead.
#[derive(thiserror::Error, Debug)]
pub enum PreviewError {
    /// Invalid user-provided configuration or input data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed canvas arrangement input.
    #[error("scene error: {0}")]
    Scene(String),

    /// Image reference could not be loaded or decoded.
    #[error("asset error: {0}")]
    Asset(String),

    /// Raster surface could not be allocated or read back.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PreviewError {
    /// Build a [`PreviewError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PreviewError::Scene`] value.
    pub fn scene(msg: impl Into<String>) -> Self {
        Self::Scene(msg.into())
    }

    /// Build a [`PreviewError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`PreviewError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`PreviewError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
