//! Ingestor: drives parsing and normalisation over the three input shapes
//! and persists the results through a [`LogStore`].
//!
//! Each line is processed inside its own failure boundary: a parse error or a
//! panic in a pattern extractor is logged, counted, and skipped without
//! affecting neighbouring lines. Only storage failures abort a call.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use logfold_core::config::IngestConfig;
use logfold_core::normalizer::channel_or_default;
use logfold_core::parser::preview;
use logfold_core::{
    Diagnostics, LogLevel, LogRecord, LogStore, Metadata, NewLogRecord, NormalizedLog, Normalizer,
    Parser,
};

use crate::error::{IngestError, LineError};
use crate::upload::{approximate_line_count, check_content_type, check_line_count, split_lines, FileUpload};

/// Format tag recorded for entries submitted already structured.
pub const STRUCTURED_FORMAT: &str = "structured";

const PREVIEW_CHARS: usize = 80;

// ---------------------------------------------------------------------------
// Inputs and results
// ---------------------------------------------------------------------------

/// A log entry submitted with its attributes already separated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredEntry {
    pub level: LogLevel,
    pub message: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingestion_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Raw lines of arbitrary formats, ingested as one batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBatch {
    pub lines: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingestion_source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawIngestResult {
    pub ingested: usize,
    pub failed: usize,
    /// The persisted records with their assigned ids, in input order.
    pub entries: Vec<LogRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    pub filename: String,
    pub total_lines: usize,
    pub ingested: usize,
    pub failed: usize,
    pub skipped_empty: usize,
    pub duration_ms: u64,
}

// ---------------------------------------------------------------------------
// Ingestor
// ---------------------------------------------------------------------------

pub struct Ingestor<S: LogStore + ?Sized> {
    store: Arc<S>,
    parser: Parser,
    normalizer: Normalizer,
    config: IngestConfig,
    diagnostics: Diagnostics,
}

impl<S: LogStore + ?Sized> Ingestor<S> {
    /// An ingestor over the built-in pattern registry.
    pub fn new(store: Arc<S>, config: IngestConfig, diagnostics: Diagnostics) -> Self {
        Self {
            store,
            parser: Parser::builtin(diagnostics.clone()),
            normalizer: Normalizer::new(diagnostics.clone()),
            config,
            diagnostics,
        }
    }

    /// Replace the parser, e.g. with one whose registry carries custom patterns.
    pub fn with_parser(mut self, parser: Parser) -> Self {
        self.parser = parser;
        self
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Persist a single pre-structured entry. No parsing is involved.
    pub async fn ingest_structured(&self, entry: StructuredEntry) -> Result<LogRecord, IngestError> {
        let raw_log = serde_json::to_string(&entry).unwrap_or_else(|_| entry.message.clone());
        let record = NewLogRecord {
            level: entry.level,
            source: entry.source.to_lowercase(),
            message: entry.message,
            timestamp: Utc::now(),
            raw_log,
            ingestion_source: channel_or_default(entry.ingestion_source.as_deref()).to_string(),
            format: STRUCTURED_FORMAT.to_string(),
            metadata: entry.metadata.unwrap_or_default(),
        };

        match self.store.create(record).await {
            Ok(stored) => {
                self.diagnostics.scope(|| {
                    tracing::debug!(id = stored.id, level = %stored.entry.level, "structured entry stored");
                });
                Ok(stored)
            }
            Err(err) => {
                self.diagnostics.scope(|| tracing::error!(error = %err, "storing structured entry failed"));
                Err(err.into())
            }
        }
    }

    /// Parse, normalise and persist `batch.lines` as one atomic batch.
    ///
    /// Lines that fail are counted and left out; if none succeed no storage
    /// call is made. A storage failure persists nothing from this call.
    pub async fn ingest_raw(&self, batch: RawBatch) -> Result<RawIngestResult, IngestError> {
        let channel = channel_or_default(batch.ingestion_source.as_deref());

        let mut records = Vec::with_capacity(batch.lines.len());
        let mut failed = 0;
        for (idx, line) in batch.lines.iter().enumerate() {
            match self.process_line(line, channel) {
                Ok(entry) => records.push(NewLogRecord::from(entry)),
                Err(err) => {
                    failed += 1;
                    self.report_line_failure(idx + 1, line, &err);
                }
            }
        }

        let entries = if records.is_empty() {
            Vec::new()
        } else {
            let pending = records.len();
            match self.store.create_batch(records).await {
                Ok(stored) => stored,
                Err(err) => {
                    self.diagnostics.scope(|| {
                        tracing::error!(error = %err, entries = pending, "storing raw batch failed");
                    });
                    return Err(err.into());
                }
            }
        };

        self.diagnostics.scope(|| {
            tracing::info!(
                channel,
                ingested = entries.len(),
                failed,
                "raw batch ingested"
            );
        });
        Ok(RawIngestResult {
            ingested: entries.len(),
            failed,
            entries,
        })
    }

    /// Validate, split and ingest an uploaded file in chunks of
    /// `config.chunk_size` entries.
    ///
    /// Validation failures return before any line is parsed. Each chunk is
    /// its own atomic batch; if one fails, the chunks before it stay
    /// persisted and the error reports how many entries were committed.
    pub async fn ingest_file(
        &self,
        upload: FileUpload,
        ingestion_source: Option<&str>,
    ) -> Result<UploadResult, IngestError> {
        let started = Instant::now();

        check_content_type(&upload.content_type, &self.config.allowed_content_types)?;
        check_line_count(approximate_line_count(&upload.content), self.config.max_lines)?;

        let channel = match ingestion_source {
            Some(c) if !c.trim().is_empty() => c,
            _ => self.config.upload_channel.as_str(),
        };

        let text = String::from_utf8_lossy(&upload.content);
        let lines = split_lines(&text);
        let total_lines = lines.len();

        let mut records = Vec::with_capacity(total_lines);
        let mut failed = 0;
        let mut skipped_empty = 0;
        for (idx, line) in lines.iter().enumerate() {
            if line.trim().is_empty() {
                skipped_empty += 1;
                continue;
            }
            match self.process_line(line, channel) {
                Ok(entry) => records.push(NewLogRecord::from(entry)),
                Err(err) => {
                    failed += 1;
                    self.report_line_failure(idx + 1, line, &err);
                }
            }
        }

        let mut ingested = 0;
        for (chunk, batch) in records.chunks(self.config.chunk_size.max(1)).enumerate() {
            let stored = match self.store.create_batch(batch.to_vec()).await {
                Ok(stored) => stored.len(),
                Err(source) => {
                    self.diagnostics.scope(|| {
                        tracing::error!(
                            filename = %upload.filename,
                            chunk,
                            committed = ingested,
                            error = %source,
                            "storing upload chunk failed"
                        );
                    });
                    return Err(IngestError::ChunkFailed {
                        chunk,
                        committed: ingested,
                        source,
                    });
                }
            };
            ingested += stored;
            self.diagnostics.scope(|| {
                tracing::debug!(filename = %upload.filename, chunk, size = stored, "chunk committed");
            });
        }

        let result = UploadResult {
            filename: upload.filename,
            total_lines,
            ingested,
            failed,
            skipped_empty,
            duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        };
        self.diagnostics.scope(|| {
            tracing::info!(
                filename = %result.filename,
                channel,
                total_lines = result.total_lines,
                ingested = result.ingested,
                failed = result.failed,
                skipped_empty = result.skipped_empty,
                duration_ms = result.duration_ms,
                "file ingested"
            );
        });
        Ok(result)
    }

    /// Parse and normalise one line, converting extractor errors and panics
    /// into a [`LineError`].
    fn process_line(&self, line: &str, channel: &str) -> Result<NormalizedLog, LineError> {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| -> Result<NormalizedLog, LineError> {
            let parsed = self.parser.parse(line)?;
            Ok(self.normalizer.normalize(&parsed, line, Some(channel)))
        }));
        outcome.unwrap_or_else(|payload| Err(LineError::Panicked(panic_message(payload.as_ref()))))
    }

    fn report_line_failure(&self, line_no: usize, line: &str, err: &LineError) {
        self.diagnostics.scope(|| {
            tracing::warn!(
                line = line_no,
                preview = %preview(line.trim(), PREVIEW_CHARS),
                error = %err,
                "failed to ingest line"
            );
        });
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
