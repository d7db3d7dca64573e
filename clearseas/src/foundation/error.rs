/// Crate-wide result alias.
pub type ClearSeasResult<T> = Result<T, ClearSeasError>;

#[derive(thiserror::Error, Debug)]
/// Errors raised at the edges of the crate (file loading, tree walking, report writing).
///
/// Normalization, merging and selection never fail; malformed input degrades to empty output.
pub enum ClearSeasError {
    /// Input failed a structural check.
    #[error("validation error: {0}")]
    Validation(String),

    /// A manifest document could not be loaded.
    #[error("manifest error: {0}")]
    Manifest(String),

    /// The HTML asset scan could not complete.
    #[error("scan error: {0}")]
    Scan(String),

    /// JSON encoding or decoding failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Filesystem access failed.
    #[error("io error: {0}")]
    Io(String),

    /// Anything else, with its source chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ClearSeasError {
    /// Build a [`ClearSeasError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ClearSeasError::Manifest`].
    pub fn manifest(msg: impl Into<String>) -> Self {
        Self::Manifest(msg.into())
    }

    /// Build a [`ClearSeasError::Scan`].
    pub fn scan(msg: impl Into<String>) -> Self {
        Self::Scan(msg.into())
    }

    /// Build a [`ClearSeasError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`ClearSeasError::Io`].
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
