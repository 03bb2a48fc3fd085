//! logfold-core: parsing and normalisation for logs of unknown format.
//!
//! # Pipeline
//!
//! ```text
//! raw line ──► Parser ──► ParsedLog ──► Normalizer ──► NormalizedLog ──► LogStore
//!                │
//!                └── PatternRegistry (syslog, clf, generic, custom…)
//! ```
//!
//! The parser tries JSON first, then each registered pattern in order, and
//! finally keeps the line verbatim as an `unknown` entry. The normalizer fills
//! every missing attribute with a deterministic default. Both take a
//! [`Diagnostics`] handle at construction and log through it.

pub mod config;
pub mod diag;
pub mod error;
pub mod levels;
pub mod normalizer;
pub mod parser;
pub mod patterns;
pub mod store;
pub mod time;
pub mod types;

pub use diag::Diagnostics;
pub use error::{ParseError, StoreError};
pub use normalizer::Normalizer;
pub use parser::Parser;
pub use patterns::{Extracted, LogPattern, PatternRegistry, RegexPattern};
pub use store::{LogFilter, LogRecord, LogStore, MemoryStore, NewLogRecord, Pagination};
pub use types::{Fields, LogLevel, Metadata, NormalizedLog, ParsedLog};
