//! Domain-specific assertion macros for logfold harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear *which* pipeline stage produced the unexpected value.

use logfold::NormalizedLog;

// ---------------------------------------------------------------------------
// Parse assertions
// ---------------------------------------------------------------------------

/// Assert which strategy parsed a line.
///
/// ```rust
/// assert_format!(parser, "Feb  6 14:12:01 web-01 sshd[1]: ok", "syslog");
/// ```
#[macro_export]
macro_rules! assert_format {
    ($parser:expr, $line:expr, $format:expr) => {{
        let line: &str = $line;
        let expected: &str = $format;
        match $parser.parse(line) {
            Ok(parsed) if parsed.format == expected => parsed,
            Ok(parsed) => panic!(
                "assert_format! failed:\n  line:     {:?}\n  expected: {:?}\n  actual:   {:?}",
                line, expected, parsed.format
            ),
            Err(err) => panic!("assert_format! failed: parse error {err} for line {line:?}"),
        }
    }};
}

/// Assert that metadata carries `key` with a JSON-comparable value.
///
/// ```rust
/// assert_has_metadata!(normalized, "pid", 4512);
/// ```
#[macro_export]
macro_rules! assert_has_metadata {
    ($normalized:expr, $key:expr, $value:expr) => {{
        let key: &str = $key;
        let expected = serde_json::json!($value);
        match $normalized.metadata.get(key) {
            Some(actual) => pretty_assertions::assert_eq!(actual, &expected, "metadata[{key:?}]"),
            None => panic!(
                "assert_has_metadata! failed: key {:?} missing.\n  Available: {:?}",
                key,
                $normalized.metadata.keys().collect::<Vec<_>>()
            ),
        }
    }};
}

// ---------------------------------------------------------------------------
// Ingestion assertions
// ---------------------------------------------------------------------------

/// Assert every counter of an `UploadResult` at once.
///
/// ```rust
/// assert_upload_counts!(result, total: 4, ingested: 2, failed: 1, skipped: 1);
/// ```
#[macro_export]
macro_rules! assert_upload_counts {
    ($result:expr, total: $total:expr, ingested: $ingested:expr, failed: $failed:expr, skipped: $skipped:expr) => {{
        let r = &$result;
        pretty_assertions::assert_eq!(
            (r.total_lines, r.ingested, r.failed, r.skipped_empty),
            ($total, $ingested, $failed, $skipped),
            "(total_lines, ingested, failed, skipped_empty) for {:?}",
            r.filename
        );
    }};
}

// ---------------------------------------------------------------------------
// Normalised entry invariants
// ---------------------------------------------------------------------------

/// Invariants every normalised entry satisfies, whichever strategy parsed it.
pub fn assert_normalized_invariants(entry: &NormalizedLog) {
    assert!(!entry.message.is_empty(), "message must never be empty: {:?}", entry.raw_log);
    assert!(!entry.source.is_empty(), "source must never be empty: {:?}", entry.raw_log);
    assert_eq!(
        entry.source,
        entry.source.to_lowercase(),
        "source must be lowercase: {:?}",
        entry.raw_log
    );
    assert!(
        !entry.source.ends_with(['.', ':']),
        "source keeps a trailing separator: {:?}",
        entry.source
    );
    assert!(!entry.ingestion_source.is_empty());
    assert!(
        entry.metadata.values().all(|v| !v.is_null()),
        "metadata must not carry nulls: {:?}",
        entry.metadata
    );
}
