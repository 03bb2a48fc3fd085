//! Normalizer: turns a partially-populated [`ParsedLog`] into a
//! fully-populated [`NormalizedLog`].
//!
//! Missing attributes get deterministic defaults; messages are bounded and
//! sources canonicalised so that storage sees one shape regardless of which
//! strategy parsed the line.

use chrono::Utc;

use crate::diag::Diagnostics;
use crate::types::{LogLevel, Metadata, NormalizedLog, ParsedLog};

/// Longest message kept, in characters, before the truncation marker.
pub const MAX_MESSAGE_CHARS: usize = 10_240;
pub const TRUNCATION_MARKER: &str = "… [truncated]";

pub const DEFAULT_LEVEL: LogLevel = LogLevel::Info;
pub const DEFAULT_MESSAGE: &str = "(empty)";
pub const DEFAULT_SOURCE: &str = "unknown";
/// Delivery channel recorded when the caller names none.
pub const DEFAULT_CHANNEL: &str = "api";

#[derive(Debug, Clone)]
pub struct Normalizer {
    diagnostics: Diagnostics,
}

impl Normalizer {
    pub fn new(diagnostics: Diagnostics) -> Self {
        Self { diagnostics }
    }

    pub fn normalize(
        &self,
        parsed: &ParsedLog,
        raw_log: &str,
        ingestion_source: Option<&str>,
    ) -> NormalizedLog {
        let level = parsed.level.unwrap_or_else(|| {
            self.diagnostics.scope(|| {
                tracing::debug!(format = %parsed.format, "no level detected, defaulting to info");
            });
            DEFAULT_LEVEL
        });

        NormalizedLog {
            level,
            message: normalize_message(parsed.message.as_deref()),
            source: normalize_source(parsed.source.as_deref()),
            timestamp: parsed.timestamp.unwrap_or_else(Utc::now),
            raw_log: raw_log.to_string(),
            ingestion_source: channel_or_default(ingestion_source).to_string(),
            format: parsed.format.clone(),
            metadata: sanitize_fields(parsed),
        }
    }

    /// Apply [`Normalizer::normalize`] to each `(parsed, raw)` pair in order.
    pub fn normalize_many<'a, I>(&self, items: I, ingestion_source: Option<&str>) -> Vec<NormalizedLog>
    where
        I: IntoIterator<Item = (&'a ParsedLog, &'a str)>,
    {
        items
            .into_iter()
            .map(|(parsed, raw)| self.normalize(parsed, raw, ingestion_source))
            .collect()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(Diagnostics::current())
    }
}

/// Trim, default, and bound a message to [`MAX_MESSAGE_CHARS`] characters.
pub fn normalize_message(message: Option<&str>) -> String {
    let message = message.map(str::trim).unwrap_or_default();
    if message.is_empty() {
        return DEFAULT_MESSAGE.to_string();
    }
    match message.char_indices().nth(MAX_MESSAGE_CHARS) {
        Some((cut, _)) => format!("{}{TRUNCATION_MARKER}", &message[..cut]),
        None => message.to_string(),
    }
}

/// Trim, lowercase, and drop any trailing `.`/`:` run (`Web-01.:` → `web-01`).
pub fn normalize_source(source: Option<&str>) -> String {
    let cleaned = source
        .unwrap_or_default()
        .trim()
        .to_lowercase()
        .trim_end_matches(['.', ':'])
        .to_string();
    // Separator-only input such as `"..."` strips down to nothing and is
    // stored as `unknown`, never as an empty source.
    if cleaned.is_empty() {
        DEFAULT_SOURCE.to_string()
    } else {
        cleaned
    }
}

pub fn channel_or_default(channel: Option<&str>) -> &str {
    match channel {
        Some(c) if !c.trim().is_empty() => c,
        _ => DEFAULT_CHANNEL,
    }
}

/// Copy fields into metadata, dropping absent values and explicit nulls.
fn sanitize_fields(parsed: &ParsedLog) -> Metadata {
    parsed
        .fields
        .iter()
        .filter_map(|(key, value)| match value {
            Some(v) if !v.is_null() => Some((key.clone(), v.clone())),
            _ => None,
        })
        .collect()
}
