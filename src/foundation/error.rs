/// Convenience result type used across toon.
pub type ToonResult<T> = Result<T, ToonError>;

/// Top-level error taxonomy used by resolution, sampling and rendering APIs.
#[derive(thiserror::Error, Debug)]
pub enum ToonError {
    /// A symbolic placeholder could not be substituted unambiguously.
    #[error("resolution error: {0}")]
    Resolution(String),

    /// Two animated values bound to different clocks were combined.
    #[error("clock error: {0}")]
    Clock(String),

    /// Geometry was over- or under-specified.
    #[error("geometry error: {0}")]
    Geometry(String),

    /// A time-varying value was used where a constant is required, or sample grids disagree.
    #[error("animation error: {0}")]
    Animation(String),

    /// Invalid user-provided style, point or numeric data.
    #[error("validation error: {0}")]
    Validation(String),

    /// The active renderer does not support the requested operation.
    #[error("renderer error: {0}")]
    Renderer(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ToonError {
    /// Build a [`ToonError::Resolution`] value.
    pub fn resolution(msg: impl Into<String>) -> Self {
        Self::Resolution(msg.into())
    }

    /// Build a [`ToonError::Clock`] value.
    pub fn clock(msg: impl Into<String>) -> Self {
        Self::Clock(msg.into())
    }

    /// Build a [`ToonError::Geometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    /// Build a [`ToonError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`ToonError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ToonError::Renderer`] value.
    pub fn renderer(msg: impl Into<String>) -> Self {
        Self::Renderer(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
