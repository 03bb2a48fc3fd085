//! Level synonym table shared by JSON extraction and the regex patterns.

use crate::types::LogLevel;

/// Lowercase level spellings seen in the wild, mapped onto the five
/// canonical levels. Syslog severities fold into the nearest level.
static LEVEL_SYNONYMS: phf::Map<&'static str, LogLevel> = phf::phf_map! {
    "debug" => LogLevel::Debug,
    "dbg" => LogLevel::Debug,
    "trace" => LogLevel::Debug,
    "verbose" => LogLevel::Debug,
    "info" => LogLevel::Info,
    "information" => LogLevel::Info,
    "informational" => LogLevel::Info,
    "notice" => LogLevel::Info,
    "warn" => LogLevel::Warn,
    "warning" => LogLevel::Warn,
    "error" => LogLevel::Error,
    "err" => LogLevel::Error,
    "fatal" => LogLevel::Fatal,
    "critical" => LogLevel::Fatal,
    "crit" => LogLevel::Fatal,
    "alert" => LogLevel::Fatal,
    "emerg" => LogLevel::Fatal,
    "emergency" => LogLevel::Fatal,
    "panic" => LogLevel::Fatal,
};

/// Map a raw level token onto a canonical level, case-insensitively.
///
/// Unknown tokens yield `None`; callers leave the level unset rather than
/// treating it as an error.
pub fn map_level(raw: &str) -> Option<LogLevel> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    LEVEL_SYNONYMS.get(raw.to_ascii_lowercase().as_str()).copied()
}
