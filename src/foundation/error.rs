/// Convenience result type used across the crate.
pub type GlyphsetResult<T> = Result<T, GlyphsetError>;

/// Top-level error taxonomy used by dataset-generation APIs.
#[derive(thiserror::Error, Debug)]
pub enum GlyphsetError {
    /// Invalid input data (mismatched canvas shapes, empty sequences).
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid configuration (sweep parameters, glyph specifications).
    #[error("configuration error: {0}")]
    Config(String),

    /// Degenerate glyph geometry (zero-ink bounding boxes, non-converging fits).
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GlyphsetError {
    /// Build a [`GlyphsetError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GlyphsetError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`GlyphsetError::Geometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
