//! Application-style lines: `2026-02-06T14:12:01.123Z [ERROR] auth-service: message`.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::{required, Extracted, RegexPattern};
use crate::error::ParseError;
use crate::levels::map_level;
use crate::time::parse_iso8601;

pub const NAME: &str = "generic";

static GENERIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<timestamp>[0-9]{4}-[0-9]{2}-[0-9]{2}[T ][0-9]{2}:[0-9]{2}:[0-9]{2}(?:\.[0-9]+)?(?:Z|[+-][0-9]{2}:?[0-9]{2})?)\s+\[?(?P<level>[A-Za-z0-9_]+)\]?\s+(?:(?P<source>[A-Za-z0-9_.-]+):\s+)?(?P<message>.+)$",
    )
    .expect("generic regex is valid")
});

pub fn generic() -> RegexPattern {
    RegexPattern::new(NAME, GENERIC_RE.clone(), extract)
}

fn extract(caps: &Captures<'_>) -> Result<Extracted, ParseError> {
    let timestamp = required(caps, NAME, "timestamp")?;
    let level = required(caps, NAME, "level")?;
    let message = required(caps, NAME, "message")?;

    Ok(Extracted {
        level: map_level(level),
        message: Some(message.to_string()),
        source: caps.name("source").map(|m| m.as_str().to_string()),
        timestamp: parse_iso8601(timestamp),
        ..Extracted::default()
    })
}
