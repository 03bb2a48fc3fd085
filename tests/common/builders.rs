//! Test builders: ergonomic constructors for `ParsedLog`, structured
//! entries, and upload files.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use logfold::core::config::IngestConfig;
use logfold::core::{Fields, LogStore};
use logfold::{Diagnostics, FileUpload, Ingestor, LogLevel, ParsedLog, Parser, StructuredEntry};

use super::fixtures::{pinned_registry, FAILING_PREFIX, PANICKING_PREFIX};

// ---------------------------------------------------------------------------
// ParsedLogBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`ParsedLog`] fixtures.
///
/// # Example
///
/// ```rust
/// let parsed = ParsedLogBuilder::new("json")
///     .level(LogLevel::Error)
///     .message("timeout connecting to db")
///     .field("request_id", "req-abc123")
///     .absent("trace_id")
///     .build();
/// ```
pub struct ParsedLogBuilder {
    inner: ParsedLog,
}

impl ParsedLogBuilder {
    pub fn new(format: &str) -> Self {
        Self {
            inner: ParsedLog::empty(format),
        }
    }

    pub fn level(mut self, level: LogLevel) -> Self {
        self.inner.level = Some(level);
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.inner.message = Some(message.into());
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.inner.source = Some(source.into());
        self
    }

    pub fn timestamp(mut self, ts: DateTime<Utc>) -> Self {
        self.inner.timestamp = Some(ts);
        self
    }

    pub fn field(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.inner.fields.insert(key.into(), Some(value.into()));
        self
    }

    /// A key the extractor named but could not fill.
    pub fn absent(mut self, key: impl Into<String>) -> Self {
        self.inner.fields.insert(key.into(), None);
        self
    }

    pub fn fields(mut self, fields: Fields) -> Self {
        self.inner.fields = fields;
        self
    }

    pub fn build(self) -> ParsedLog {
        self.inner
    }
}

// ---------------------------------------------------------------------------
// Structured entries
// ---------------------------------------------------------------------------

pub fn structured(level: LogLevel, message: &str, source: &str) -> StructuredEntry {
    StructuredEntry {
        level,
        message: message.to_string(),
        source: source.to_string(),
        ingestion_source: None,
        metadata: None,
    }
}

// ---------------------------------------------------------------------------
// Upload files
// ---------------------------------------------------------------------------

/// Kind of line appended by [`UploadBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Valid,
    Blank,
    Failing,
    Panicking,
}

/// Builds upload content while tracking what each line is expected to do.
///
/// ```rust
/// let upload = UploadBuilder::new("app.log")
///     .valid("2026-02-06T14:12:01Z [INFO] api: ready")
///     .blank()
///     .failing()
///     .build();
/// ```
pub struct UploadBuilder {
    filename: String,
    content_type: String,
    lines: Vec<(LineKind, String)>,
    crlf: bool,
}

impl UploadBuilder {
    pub fn new(filename: &str) -> Self {
        Self {
            filename: filename.to_string(),
            content_type: "text/plain".to_string(),
            lines: Vec::new(),
            crlf: false,
        }
    }

    pub fn content_type(mut self, content_type: &str) -> Self {
        self.content_type = content_type.to_string();
        self
    }

    pub fn crlf(mut self) -> Self {
        self.crlf = true;
        self
    }

    pub fn valid(mut self, line: impl Into<String>) -> Self {
        self.lines.push((LineKind::Valid, line.into()));
        self
    }

    pub fn blank(mut self) -> Self {
        self.lines.push((LineKind::Blank, "   ".to_string()));
        self
    }

    pub fn failing(mut self) -> Self {
        let n = self.lines.len();
        self.lines.push((LineKind::Failing, format!("{FAILING_PREFIX}line {n}")));
        self
    }

    pub fn panicking(mut self) -> Self {
        let n = self.lines.len();
        self.lines.push((LineKind::Panicking, format!("{PANICKING_PREFIX}line {n}")));
        self
    }

    pub fn push(self, kind: LineKind) -> Self {
        match kind {
            LineKind::Valid => {
                let n = self.lines.len();
                self.valid(format!("2026-02-06T14:12:01Z [INFO] svc-{n}: line {n}"))
            }
            LineKind::Blank => self.blank(),
            LineKind::Failing => self.failing(),
            LineKind::Panicking => self.panicking(),
        }
    }

    pub fn count(&self, kind: LineKind) -> usize {
        self.lines.iter().filter(|(k, _)| *k == kind).count()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn text(&self) -> String {
        let sep = if self.crlf { "\r\n" } else { "\n" };
        self.lines
            .iter()
            .map(|(_, line)| line.as_str())
            .collect::<Vec<_>>()
            .join(sep)
    }

    pub fn build(&self) -> FileUpload {
        FileUpload::new(self.filename.clone(), self.content_type.clone(), self.text().into_bytes())
    }
}

// ---------------------------------------------------------------------------
// Ingestors
// ---------------------------------------------------------------------------

/// An ingestor over `store` with default limits, a pinned syslog year and
/// silent diagnostics.
pub fn ingestor<S: LogStore + ?Sized>(store: Arc<S>) -> Ingestor<S> {
    ingestor_with(store, IngestConfig::default())
}

pub fn ingestor_with<S: LogStore + ?Sized>(store: Arc<S>, config: IngestConfig) -> Ingestor<S> {
    Ingestor::new(store, config, Diagnostics::silent())
        .with_parser(Parser::new(pinned_registry(), Diagnostics::silent()))
}

/// Like [`ingestor`], but the parser also carries the failing and panicking
/// fixture patterns.
pub fn misbehaving_ingestor<S: LogStore + ?Sized>(store: Arc<S>, config: IngestConfig) -> Ingestor<S> {
    Ingestor::new(store, config, Diagnostics::silent()).with_parser(Parser::new(
        super::fixtures::misbehaving_registry(),
        Diagnostics::silent(),
    ))
}
