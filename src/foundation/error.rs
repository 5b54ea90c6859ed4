/// Crate-wide result alias.
pub type DialogResult<T> = Result<T, DialogError>;

/// Errors surfaced by asset loading, configuration and encoding.
///
/// Frame generation itself never fails once assets are loaded; configuration values that
/// get clamped or defaulted are reported as [`crate::PlanNotice`]s instead.
#[derive(thiserror::Error, Debug)]
pub enum DialogError {
    /// Background image or font could not be read or parsed.
    #[error("resource load error: {0}")]
    ResourceLoad(String),

    /// Invalid configuration value.
    #[error("validation error: {0}")]
    Validation(String),

    /// Writing the animated container failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Any other error with preserved source chain.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DialogError {
    /// Build a [`DialogError::ResourceLoad`].
    pub fn resource_load(msg: impl Into<String>) -> Self {
        Self::ResourceLoad(msg.into())
    }

    /// Build a [`DialogError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`DialogError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
