use logfold_core::config::FileTooLarge;
use logfold_core::{ParseError, StoreError};
use thiserror::Error;

/// Input rejected before any line is parsed or persisted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unsupported content type `{content_type}` (allowed: {allowed})")]
    UnsupportedContentType { content_type: String, allowed: String },

    #[error("file has roughly {lines} lines, more than the {max} allowed; split it into smaller files")]
    TooManyLines { lines: usize, max: usize },

    #[error(transparent)]
    FileTooLarge(#[from] FileTooLarge),

    #[error("invalid query: {0}")]
    InvalidQuery(String),
}

/// Why a single line could not be turned into a log entry. Counted and
/// logged; never aborts the rest of the batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("line processing panicked: {0}")]
    Panicked(String),
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StoreError),

    /// An upload chunk failed to persist. Chunks before it stay committed.
    #[error("storing chunk {chunk} failed after {committed} entries were committed: {source}")]
    ChunkFailed {
        chunk: usize,
        committed: usize,
        #[source]
        source: StoreError,
    },
}
