//! Timestamp parsing helpers.
//!
//! Every helper returns `None` for text that does not describe a valid
//! instant; callers leave the timestamp unset and the normalizer fills in
//! the processing time.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde_json::Value;

/// Parse an ISO-8601-like timestamp.
///
/// Accepts `T` or a space between date and time, optional fractional
/// seconds, and `Z`, `+hh:mm` or `+hhmm` offsets. Text without an offset is
/// read as UTC.
pub fn parse_iso8601(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.len() < 19 || !text.is_char_boundary(10) || !text.is_char_boundary(11) {
        return None;
    }
    // Canonicalise the date/time separator so a single set of formats applies.
    let text = match text.as_bytes()[10] {
        b' ' | b't' => format!("{}T{}", &text[..10], &text[11..]),
        _ => text.to_string(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(&text, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&text, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Parse a JSON timestamp value: epoch milliseconds or a date string.
///
/// Besides the ISO-8601 forms of [`parse_iso8601`], strings may be a bare
/// date (midnight UTC) or RFC 2822 (`Fri, 06 Feb 2026 14:12:01 GMT`).
pub fn parse_json_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_iso8601(s)
            .or_else(|| parse_date_only(s))
            .or_else(|| {
                DateTime::parse_from_rfc2822(s.trim())
                    .ok()
                    .map(|dt| dt.with_timezone(&Utc))
            }),
        Value::Number(n) => {
            let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            DateTime::from_timestamp_millis(millis)
        }
        _ => None,
    }
}

fn parse_date_only(text: &str) -> Option<DateTime<Utc>> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Parse the bracketed Common Log Format timestamp, e.g.
/// `06/Feb/2026:14:12:01 +0000`.
pub fn parse_clf(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_str(text.trim(), "%d/%b/%Y:%H:%M:%S %z")
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Build an RFC 3164 syslog timestamp. The format carries no year, so the
/// caller supplies one; the result is read as UTC.
pub fn syslog_timestamp(month: &str, day: &str, time: &str, year: i32) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(&format!("{year} {month} {day}"), "%Y %b %d").ok()?;
    let time = NaiveTime::parse_from_str(time, "%H:%M:%S").ok()?;
    Utc.from_local_datetime(&date.and_time(time)).single()
}
