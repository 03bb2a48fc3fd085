//! Common / combined log format access lines.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::Value;

use super::{number_or_text, required, Extracted, RegexPattern};
use crate::error::ParseError;
use crate::time::parse_clf;
use crate::types::{Fields, LogLevel};

pub const NAME: &str = "clf";

static CLF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(?P<ip>\S+)\s+\S+\s+(?P<user>\S+)\s+\[(?P<datetime>[^\]]+)\]\s+"(?P<method>[A-Za-z0-9_]+)\s+(?P<path>\S+)\s+\S+"\s+(?P<status>[0-9]{3})\s+(?P<bytes>[0-9]+|-)(?:\s+"(?P<referer>[^"]*)"\s+"(?P<ua>[^"]*)")?$"#,
    )
    .expect("clf regex is valid")
});

pub fn clf() -> RegexPattern {
    RegexPattern::new(NAME, CLF_RE.clone(), extract)
}

/// 5xx is an error, 4xx a warning, anything else informational.
pub fn level_for_status(status: u16) -> LogLevel {
    match status {
        500.. => LogLevel::Error,
        400..=499 => LogLevel::Warn,
        _ => LogLevel::Info,
    }
}

fn extract(caps: &Captures<'_>) -> Result<Extracted, ParseError> {
    let ip = required(caps, NAME, "ip")?;
    let user = required(caps, NAME, "user")?;
    let datetime = required(caps, NAME, "datetime")?;
    let method = required(caps, NAME, "method")?;
    let path = required(caps, NAME, "path")?;
    let status = required(caps, NAME, "status")?;
    let bytes = required(caps, NAME, "bytes")?;

    let level = status.parse::<u16>().ok().map(level_for_status);

    let mut fields = Fields::new();
    fields.insert("method".into(), Some(Value::from(method)));
    fields.insert("path".into(), Some(Value::from(path)));
    fields.insert("status".into(), Some(number_or_text(status)));
    let bytes = match bytes {
        "-" => Value::from(0_u64),
        n => number_or_text(n),
    };
    fields.insert("bytes".into(), Some(bytes));
    fields.insert(
        "user".into(),
        (user != "-").then(|| Value::from(user)),
    );
    fields.insert(
        "referer".into(),
        caps.name("referer").map(|m| Value::from(m.as_str())),
    );
    fields.insert(
        "userAgent".into(),
        caps.name("ua").map(|m| Value::from(m.as_str())),
    );

    Ok(Extracted {
        level,
        message: Some(format!("{method} {path} {status}")),
        source: Some(ip.to_string()),
        timestamp: parse_clf(datetime),
        fields,
        format: None,
    })
}
