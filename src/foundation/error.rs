/// Convenience result type used across kinetype.
pub type KinetypeResult<T> = Result<T, KinetypeError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Only construction-time failures are reported through this type. Per-frame work never fails:
/// missing clips and missing sizing degrade to "nothing this frame".
#[derive(thiserror::Error, Debug)]
pub enum KinetypeError {
    /// Invalid user-provided content, catalog or configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Sizing inputs that cannot produce a character grid.
    #[error("layout error: {0}")]
    Layout(String),

    /// Timeline parameters that cannot be scheduled.
    #[error("timeline error: {0}")]
    Timeline(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KinetypeError {
    /// Build a [`KinetypeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`KinetypeError::Layout`] value.
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    /// Build a [`KinetypeError::Timeline`] value.
    pub fn timeline(msg: impl Into<String>) -> Self {
        Self::Timeline(msg.into())
    }

    /// Build a [`KinetypeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
