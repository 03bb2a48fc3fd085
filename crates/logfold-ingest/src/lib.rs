//! logfold-ingest: the ingestion orchestrator.
//!
//! Accepts logs in three shapes (a single structured entry, an array of raw
//! lines, an uploaded file), runs each raw line through the
//! [`logfold_core::Parser`] and [`logfold_core::Normalizer`], and persists the
//! results through a [`logfold_core::LogStore`] in bounded atomic batches.
//! [`find_logs`] is the matching read path.

pub mod error;
pub mod orchestrator;
pub mod query;
pub mod upload;

pub use error::{IngestError, LineError, ValidationError};
pub use orchestrator::{Ingestor, RawBatch, RawIngestResult, StructuredEntry, UploadResult};
pub use query::{find_logs, LogPage, LogQuery};
pub use upload::FileUpload;
