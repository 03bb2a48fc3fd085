//! Pattern registry: the ordered chain of regex strategies the parser tries
//! after JSON detection.
//!
//! Each strategy is a [`LogPattern`]: a matcher that yields named captures and
//! an extractor that turns those captures into an [`Extracted`] partial log.
//! The built-ins (syslog, Common Log Format, generic timestamped) are values
//! of the single [`RegexPattern`] type; custom formats are appended with
//! [`PatternRegistry::with_pattern`].

mod clf;
mod generic;
mod syslog;

use chrono::{DateTime, Utc};
use regex::{Captures, Regex};
use serde_json::Value;

use crate::error::ParseError;
use crate::types::{Fields, LogLevel};

pub use clf::{clf, level_for_status};
pub use generic::generic;
pub use syslog::{syslog, syslog_for_year};

/// Partial log produced by an extractor. The parser copies it into a
/// [`crate::ParsedLog`], defaulting `format` to the pattern name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extracted {
    pub level: Option<LogLevel>,
    pub message: Option<String>,
    pub source: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    pub fields: Fields,
    pub format: Option<String>,
}

/// A named line-format strategy.
///
/// `extract` is only called with captures returned by `captures` on the same
/// pattern. Built-in patterns never return `Err`.
pub trait LogPattern: Send + Sync {
    fn name(&self) -> &str;

    fn captures<'t>(&self, line: &'t str) -> Option<Captures<'t>>;

    fn extract(&self, caps: &Captures<'_>) -> Result<Extracted, ParseError>;
}

type Extractor = Box<dyn Fn(&Captures<'_>) -> Result<Extracted, ParseError> + Send + Sync>;

/// A [`LogPattern`] backed by a compiled regex and an extractor closure.
pub struct RegexPattern {
    name: String,
    regex: Regex,
    extractor: Extractor,
}

impl RegexPattern {
    pub fn new<F>(name: impl Into<String>, regex: Regex, extractor: F) -> Self
    where
        F: Fn(&Captures<'_>) -> Result<Extracted, ParseError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            regex,
            extractor: Box::new(extractor),
        }
    }

    /// Compile `pattern` and build a strategy from it.
    pub fn compile<F>(name: impl Into<String>, pattern: &str, extractor: F) -> Result<Self, regex::Error>
    where
        F: Fn(&Captures<'_>) -> Result<Extracted, ParseError> + Send + Sync + 'static,
    {
        Ok(Self::new(name, Regex::new(pattern)?, extractor))
    }
}

impl LogPattern for RegexPattern {
    fn name(&self) -> &str {
        &self.name
    }

    fn captures<'t>(&self, line: &'t str) -> Option<Captures<'t>> {
        self.regex.captures(line)
    }

    fn extract(&self, caps: &Captures<'_>) -> Result<Extracted, ParseError> {
        (self.extractor)(caps)
    }
}

impl std::fmt::Debug for RegexPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegexPattern")
            .field("name", &self.name)
            .field("regex", &self.regex.as_str())
            .finish_non_exhaustive()
    }
}

/// Immutable, ordered list of strategies. Earlier patterns win.
pub struct PatternRegistry {
    patterns: Vec<Box<dyn LogPattern>>,
}

impl PatternRegistry {
    /// An explicit chain, tried in the given order.
    pub fn new(patterns: Vec<Box<dyn LogPattern>>) -> Self {
        Self { patterns }
    }

    /// Syslog, then Common Log Format, then generic timestamped.
    pub fn builtin() -> Self {
        Self::new(vec![Box::new(syslog()), Box::new(clf()), Box::new(generic())])
    }

    /// Append a strategy after the existing ones.
    pub fn with_pattern(mut self, pattern: impl LogPattern + 'static) -> Self {
        self.patterns.push(Box::new(pattern));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn LogPattern> {
        self.patterns.iter().map(|p| p.as_ref())
    }

    pub fn names(&self) -> Vec<&str> {
        self.iter().map(|p| p.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for PatternRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Debug for PatternRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

// ---------------------------------------------------------------------------
// Extractor helpers
// ---------------------------------------------------------------------------

/// Fetch a capture group the pattern's regex guarantees, reporting a
/// [`ParseError::MissingCapture`] if it is somehow absent.
pub fn required<'t>(caps: &Captures<'t>, pattern: &str, group: &str) -> Result<&'t str, ParseError> {
    caps.name(group)
        .map(|m| m.as_str())
        .ok_or_else(|| ParseError::MissingCapture {
            pattern: pattern.to_string(),
            group: group.to_string(),
        })
}

/// Render a digit run as a JSON number when it fits, otherwise keep the text.
pub(crate) fn number_or_text(text: &str) -> Value {
    if let Ok(n) = text.parse::<u64>() {
        return Value::from(n);
    }
    match text.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
        Some(n) => Value::Number(n),
        None => Value::String(text.to_string()),
    }
}
