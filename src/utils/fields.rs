//! Ordered field lookups over raw provider JSON.
//!
//! Providers rename and nest fields between versions, so every output field is
//! described as a list of JSON pointers tried in order. The first pointer that
//! resolves to a usable value wins; otherwise the chain's default applies.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

/// Ordered candidate paths for one text field
#[derive(Debug, Clone, Copy)]
pub struct FieldChain {
    pub paths: &'static [&'static str],
    pub default: Option<&'static str>,
}

impl FieldChain {
    pub const fn new(paths: &'static [&'static str]) -> Self {
        Self {
            paths,
            default: None,
        }
    }

    pub const fn or(paths: &'static [&'static str], default: &'static str) -> Self {
        Self {
            paths,
            default: Some(default),
        }
    }

    /// First non-empty string along the chain, then the default
    pub fn text(&self, raw: &Value) -> Option<String> {
        self.paths
            .iter()
            .find_map(|path| string_at(raw, path))
            .or_else(|| self.default.map(str::to_string))
    }

    /// Like `text` but also accepts numbers (provider ids are either)
    pub fn id(&self, raw: &Value) -> Option<String> {
        self.paths
            .iter()
            .find_map(|path| id_at(raw, path))
            .or_else(|| self.default.map(str::to_string))
    }
}

/// One candidate for a start time
#[derive(Debug, Clone, Copy)]
pub enum TimeField {
    /// ISO-8601 string, passed through as-is
    Text(&'static str),
    /// Unix seconds, rendered as RFC 3339
    UnixSeconds(&'static str),
}

impl TimeField {
    fn resolve(&self, raw: &Value) -> Option<String> {
        match self {
            TimeField::Text(path) => string_at(raw, path),
            TimeField::UnixSeconds(path) => {
                let seconds = raw.pointer(path).and_then(Value::as_i64)?;
                if seconds == 0 {
                    return None;
                }
                DateTime::<Utc>::from_timestamp(seconds, 0)
                    .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
        }
    }
}

/// Resolve a start time chain, falling back to `now`
pub fn start_time(fields: &[TimeField], raw: &Value, now: DateTime<Utc>) -> String {
    fields
        .iter()
        .find_map(|field| field.resolve(raw))
        .unwrap_or_else(|| now.to_rfc3339_opts(SecondsFormat::Millis, true))
}

pub fn string_at(raw: &Value, path: &str) -> Option<String> {
    raw.pointer(path)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub fn id_at(raw: &Value, path: &str) -> Option<String> {
    match raw.pointer(path)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Provider envelopes use `response` or `data` for the record list
pub fn envelope_items(body: &Value, keys: &[&str]) -> Vec<Value> {
    keys.iter()
        .find_map(|key| body.get(*key).and_then(Value::as_array))
        .cloned()
        .unwrap_or_default()
}
