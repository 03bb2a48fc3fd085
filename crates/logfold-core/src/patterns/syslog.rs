//! RFC 3164 syslog lines: `Feb  6 14:12:01 web-01 sshd[4512]: message`.

use std::sync::LazyLock;

use chrono::{Datelike, Utc};
use regex::{Captures, Regex};
use serde_json::Value;

use super::{number_or_text, required, Extracted, RegexPattern};
use crate::error::ParseError;
use crate::time::syslog_timestamp;
use crate::types::Fields;

pub const NAME: &str = "syslog";

static SYSLOG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<month>[A-Za-z0-9_]{3})\s+(?P<day>[0-9]{1,2})\s+(?P<time>[0-9]{2}:[0-9]{2}:[0-9]{2})\s+(?P<host>\S+)\s+(?P<process>\S+?)(?:\[(?P<pid>[0-9]+)\])?:\s+(?P<message>.+)$",
    )
    .expect("syslog regex is valid")
});

/// Syslog strategy that stamps entries with the year they are processed in.
pub fn syslog() -> RegexPattern {
    RegexPattern::new(NAME, SYSLOG_RE.clone(), |caps| extract(caps, Utc::now().year()))
}

/// Syslog strategy with a fixed year, for reproducible timestamps.
pub fn syslog_for_year(year: i32) -> RegexPattern {
    RegexPattern::new(NAME, SYSLOG_RE.clone(), move |caps| extract(caps, year))
}

fn extract(caps: &Captures<'_>, year: i32) -> Result<Extracted, ParseError> {
    let month = required(caps, NAME, "month")?;
    let day = required(caps, NAME, "day")?;
    let time = required(caps, NAME, "time")?;
    let host = required(caps, NAME, "host")?;
    let process = required(caps, NAME, "process")?;
    let message = required(caps, NAME, "message")?;

    let mut fields = Fields::new();
    fields.insert("process".into(), Some(Value::from(process)));
    fields.insert("pid".into(), caps.name("pid").map(|m| number_or_text(m.as_str())));

    Ok(Extracted {
        level: None,
        message: Some(message.to_string()),
        source: Some(host.to_string()),
        timestamp: syslog_timestamp(month, day, time, year),
        fields,
        format: None,
    })
}
