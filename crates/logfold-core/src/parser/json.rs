//! JSON-object lines. Well-known keys are lifted into the typed attributes,
//! everything else is carried over into `fields`.

use serde_json::{Map, Value};

use crate::levels::map_level;
use crate::time::parse_json_timestamp;
use crate::types::{Fields, ParsedLog};

pub const FORMAT: &str = "json";

const LEVEL_KEYS: &[&str] = &["level", "severity", "loglevel"];
const MESSAGE_KEYS: &[&str] = &["message", "msg", "error"];
const TIMESTAMP_KEYS: &[&str] = &["timestamp", "time", "@timestamp", "ts"];
const SOURCE_KEYS: &[&str] = &["source", "service", "logger", "hostname"];

fn is_reserved(key: &str) -> bool {
    [LEVEL_KEYS, MESSAGE_KEYS, TIMESTAMP_KEYS, SOURCE_KEYS]
        .iter()
        .any(|keys| keys.contains(&key))
}

/// First key in priority order whose value is present and not null.
fn lookup<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .find(|value| !value.is_null())
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Decode `text` as a JSON object. Anything else (arrays, scalars, invalid
/// JSON) yields `None` so the caller can try the next strategy.
pub fn parse(text: &str) -> Option<ParsedLog> {
    let obj = match serde_json::from_str::<Value>(text).ok()? {
        Value::Object(obj) => obj,
        _ => return None,
    };

    let level = lookup(&obj, LEVEL_KEYS)
        .and_then(Value::as_str)
        .and_then(map_level);
    let message = Some(
        lookup(&obj, MESSAGE_KEYS)
            .map(text_of)
            .unwrap_or_else(|| Value::Object(obj.clone()).to_string()),
    );
    let timestamp = lookup(&obj, TIMESTAMP_KEYS).and_then(parse_json_timestamp);
    let source = lookup(&obj, SOURCE_KEYS).map(text_of);

    let fields: Fields = obj
        .iter()
        .filter(|(key, _)| !is_reserved(key))
        .map(|(key, value)| (key.clone(), Some(value.clone())))
        .collect();

    Some(ParsedLog {
        level,
        message,
        source,
        timestamp,
        fields,
        format: FORMAT.to_string(),
    })
}
