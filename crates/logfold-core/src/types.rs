//! Core types for logfold-core.
//!
//! This module defines the data structures that flow through the pipeline:
//! the partially-populated [`ParsedLog`] produced by the parser, the
//! fully-populated [`NormalizedLog`] handed to storage, and the closed
//! [`LogLevel`] set both of them use.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Structured fields extracted by a parsing strategy.
///
/// `None` marks a key the strategy knows about but could not fill (for
/// example a syslog line without a `[pid]`), `Some(Value::Null)` is an explicit
/// JSON null. The normalizer strips both.
pub type Fields = HashMap<String, Option<serde_json::Value>>;

/// Sanitised metadata attached to a [`NormalizedLog`]. Never contains nulls.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Log severity level, normalised across all input formats.
///
/// Ordered by severity so that defaults and fallbacks can reason about it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl LogLevel {
    /// Every level, least severe first.
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Fatal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Fatal => "fatal",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the five canonical level names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level `{0}` (expected one of debug, info, warn, error, fatal)")]
pub struct UnknownLevel(pub String);

impl FromStr for LogLevel {
    type Err = UnknownLevel;

    /// Strict parse of the canonical names only. Use
    /// [`crate::levels::map_level`] for synonyms such as `warning` or `crit`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LogLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownLevel(s.to_string()))
    }
}

/// Result of parsing one raw line. Only `fields` and `format` are guaranteed;
/// no single strategy can extract every attribute.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ParsedLog {
    pub level: Option<LogLevel>,
    pub message: Option<String>,
    pub source: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    pub fields: Fields,
    /// Name of the strategy that produced this value (`json`, `syslog`,
    /// `clf`, `generic`, `unknown`, or a custom pattern name).
    pub format: String,
}

impl ParsedLog {
    /// A parse result carrying nothing but the format tag.
    pub fn empty(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            ..Self::default()
        }
    }
}

/// A fully-populated log entry, the boundary contract towards storage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedLog {
    pub level: LogLevel,
    pub message: String,
    pub source: String,
    pub timestamp: DateTime<Utc>,
    /// The original line, untouched.
    pub raw_log: String,
    /// Delivery channel (`api`, `file-upload`, `syslog-agent`, …).
    pub ingestion_source: String,
    pub format: String,
    pub metadata: Metadata,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
