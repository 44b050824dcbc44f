/// Convenience result type used across keyraster.
pub type KeyrasterResult<T> = Result<T, KeyrasterError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum KeyrasterError {
    /// Invalid user-provided parameters (control points, quad corners, ranges, pixel coordinates).
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while sampling easing curves or keyframe tracks.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors while rendering layers into pixel grids.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KeyrasterError {
    /// Build a [`KeyrasterError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`KeyrasterError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`KeyrasterError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
