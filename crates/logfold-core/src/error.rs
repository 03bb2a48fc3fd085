use thiserror::Error;

/// Raised when a pattern's extractor cannot turn a successful match into a
/// partial log. Built-in patterns never produce this; custom patterns may.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("pattern `{pattern}` matched but capture group `{group}` is missing")]
    MissingCapture { pattern: String, group: String },

    #[error("pattern `{pattern}` failed to extract: {reason}")]
    Extraction { pattern: String, reason: String },
}

/// Storage backend failures, as reported by a [`crate::store::LogStore`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),

    #[error("storage error: {0}")]
    Backend(String),
}
