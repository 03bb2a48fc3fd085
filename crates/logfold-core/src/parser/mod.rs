//! Parser: turns one raw line into a [`ParsedLog`].
//!
//! Strategies are tried in a fixed order: JSON object detection, then every
//! pattern in the [`PatternRegistry`], then a catch-all that keeps the whole
//! line as the message. Lines are independent; the parser holds no state
//! between calls.

pub mod json;

use crate::diag::Diagnostics;
use crate::error::ParseError;
use crate::patterns::PatternRegistry;
use crate::types::ParsedLog;

/// Format tag of lines no strategy recognised.
pub const UNKNOWN_FORMAT: &str = "unknown";

#[derive(Debug)]
pub struct Parser {
    registry: PatternRegistry,
    diagnostics: Diagnostics,
}

impl Parser {
    pub fn new(registry: PatternRegistry, diagnostics: Diagnostics) -> Self {
        Self {
            registry,
            diagnostics,
        }
    }

    /// Parser over the built-in patterns.
    pub fn builtin(diagnostics: Diagnostics) -> Self {
        Self::new(PatternRegistry::builtin(), diagnostics)
    }

    /// Parse a single line.
    ///
    /// Only a custom pattern's extractor can make this fail; with the
    /// built-in registry every input yields `Ok`.
    pub fn parse(&self, raw: &str) -> Result<ParsedLog, ParseError> {
        let line = raw.trim();

        if line.starts_with('{') {
            if let Some(parsed) = json::parse(line) {
                return Ok(parsed);
            }
        }

        for pattern in self.registry.iter() {
            let Some(caps) = pattern.captures(line) else {
                continue;
            };
            let extracted = pattern.extract(&caps)?;
            return Ok(ParsedLog {
                level: extracted.level,
                message: extracted.message,
                source: extracted.source,
                timestamp: extracted.timestamp,
                fields: extracted.fields,
                format: extracted
                    .format
                    .unwrap_or_else(|| pattern.name().to_string()),
            });
        }

        self.diagnostics.scope(|| {
            tracing::debug!(
                preview = %preview(line, 80),
                "no pattern matched, keeping line as unknown"
            );
        });
        Ok(ParsedLog {
            message: Some(line.to_string()),
            ..ParsedLog::empty(UNKNOWN_FORMAT)
        })
    }

    /// Parse every line independently, preserving order and length.
    pub fn parse_many<I, S>(&self, lines: I) -> Vec<Result<ParsedLog, ParseError>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines.into_iter().map(|line| self.parse(line.as_ref())).collect()
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::builtin(Diagnostics::current())
    }
}

/// First `max` characters of `text`, for log previews.
pub fn preview(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
