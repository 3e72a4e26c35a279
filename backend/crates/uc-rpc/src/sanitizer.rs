use std::collections::HashSet;

use serde::Serialize;
use serde_json::{Map, Value};

/// Replacement for sensitive string fields
pub const REDACTED: &str = "[REDACTED]";

pub const DEFAULT_SENSITIVE_FIELDS: &[&str] = &["password", "token", "secret", "apikey", "auth"];

/// Produces log-safe deep copies of request/response payloads.
///
/// Payloads are taken through their own serde schema into a JSON tree, then
/// every object key matching a sensitive name is replaced: strings become
/// [`REDACTED`], any other value becomes its zero value. Key matching ignores
/// case as well as `_` and `-`, so `apiKey`, `api_key` and `API-KEY` all hit
/// `apikey`.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    fields: HashSet<String>,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sanitizer {
    pub fn new() -> Self {
        Self::with_fields(DEFAULT_SENSITIVE_FIELDS.iter().copied())
    }

    pub fn with_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|f| normalize(f.as_ref()))
                .filter(|f| !f.is_empty())
                .collect(),
        }
    }

    /// Default set plus `fields`; the defaults cannot be switched off
    pub fn with_additional_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sanitizer = Self::new();
        sanitizer.fields.extend(
            fields
                .into_iter()
                .map(|f| normalize(f.as_ref()))
                .filter(|f| !f.is_empty()),
        );
        sanitizer
    }

    pub fn is_sensitive(&self, field: &str) -> bool {
        self.fields.contains(&normalize(field))
    }

    /// Sanitized JSON view of any serializable payload
    pub fn sanitize<T: Serialize + ?Sized>(&self, payload: &T) -> Value {
        match serde_json::to_value(payload) {
            Ok(value) => self.sanitize_value(&value),
            Err(e) => Value::String(format!("<unserializable payload: {e}>")),
        }
    }

    pub fn sanitize_value(&self, value: &Value) -> Value {
        match value {
            Value::Object(map) => {
                let mut out = Map::with_capacity(map.len());
                for (key, field) in map {
                    let sanitized = if self.is_sensitive(key) {
                        zero_value(field)
                    } else {
                        self.sanitize_value(field)
                    };
                    out.insert(key.clone(), sanitized);
                }
                Value::Object(out)
            }
            Value::Array(items) => Value::Array(items.iter().map(|v| self.sanitize_value(v)).collect()),
            other => other.clone(),
        }
    }
}

fn zero_value(value: &Value) -> Value {
    match value {
        Value::String(_) => Value::String(REDACTED.to_string()),
        Value::Number(_) => Value::from(0),
        Value::Bool(_) => Value::Bool(false),
        Value::Array(_) => Value::Array(Vec::new()),
        Value::Object(_) => Value::Object(Map::new()),
        Value::Null => Value::Null,
    }
}

fn normalize(field: &str) -> String {
    field
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}
