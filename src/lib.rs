//! logfold: infer the structure of log lines of unknown format, normalise
//! them, and ingest them in bounded batches.
//!
//! This crate re-exports the two workspace libraries so that the binary,
//! the integration harnesses and the benches share one import path.
//!
//! # Architecture
//!
//! ```text
//!   structured entry ─┐
//!   raw lines ────────┼──► Ingestor ──► Parser ──► Normalizer ──► LogStore
//!   uploaded file ────┘        │                                     │
//!                              └───────────── find_logs ◄────────────┘
//! ```

pub use logfold_core as core;
pub use logfold_ingest as ingest;

pub use logfold_core::{
    Diagnostics, LogLevel, LogPattern, LogRecord, LogStore, MemoryStore, NormalizedLog,
    Normalizer, ParsedLog, Parser, PatternRegistry, RegexPattern,
};
pub use logfold_ingest::{
    find_logs, FileUpload, IngestError, Ingestor, LogPage, LogQuery, RawBatch, StructuredEntry,
    UploadResult, ValidationError,
};
