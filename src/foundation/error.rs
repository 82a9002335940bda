/// Convenience result type used across the crate.
pub type StudioResult<T> = Result<T, StudioError>;

/// Top-level error taxonomy used by project and edit APIs.
///
/// Interpolation never produces an error: degenerate sequences and odd query
/// frames resolve through default values instead.
#[derive(thiserror::Error, Debug)]
pub enum StudioError {
    /// Invalid user-provided project or settings data.
    #[error("validation error: {0}")]
    Validation(String),

    /// An edit addressed something that does not exist.
    #[error("edit error: {0}")]
    Edit(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StudioError {
    /// Build a [`StudioError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StudioError::Edit`] value.
    pub fn edit(msg: impl Into<String>) -> Self {
        Self::Edit(msg.into())
    }

    /// Build a [`StudioError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for StudioError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
