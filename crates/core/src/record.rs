//! Attribute record - the loosely-typed description of a media asset.
//!
//! Upstream extractors return whatever JSON they like: keys in any casing,
//! booleans as `"Yes"`/`true`/`"1"`, lists as strings, numbers as text. This
//! module is the one place that tolerance lives. Keys are normalized once when
//! the record is built and every getter has an explicit default, so rule code
//! never has to guess at shapes or handle failures.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

use crate::verdict::Verdict;
use crate::vocab::fields;
use crate::Time;

/// Tokens read as "yes" by [`AttributeRecord::get_bool`].
pub const AFFIRMATIVE: [&str; 4] = ["yes", "true", "y", "1"];

/// Normalize an attribute name: lowercase, spaces and hyphens become underscores.
pub fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase().replace([' ', '-'], "_")
}

/// A mapping from attribute name to loosely-typed value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct AttributeRecord {
    fields: Map<String, Value>,
}

impl From<Map<String, Value>> for AttributeRecord {
    fn from(raw: Map<String, Value>) -> Self {
        let fields = raw
            .into_iter()
            .map(|(k, v)| (normalize_key(&k), v))
            .collect();
        Self { fields }
    }
}

impl From<AttributeRecord> for Map<String, Value> {
    fn from(record: AttributeRecord) -> Self {
        record.fields
    }
}

impl AttributeRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from a JSON value. Returns `None` unless it is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(map.into()),
            _ => None,
        }
    }

    /// A record carrying only an extraction failure.
    pub fn from_error(message: impl Into<String>) -> Self {
        let mut record = Self::new();
        record.insert(fields::ERROR, serde_json::json!({ "message": message.into() }));
        record
    }

    /// Set a field, normalizing its name.
    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.fields.insert(normalize_key(key), value.into());
    }

    /// Raw value of a field. JSON `null` counts as absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|v| !v.is_null())
    }

    /// Whether the field exists at all, even as `null`.
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Boolean-like field: `true`, or a string in [`AFFIRMATIVE`]. Anything else is `false`.
    pub fn get_bool(&self, key: &str) -> bool {
        match self.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => AFFIRMATIVE.contains(&s.trim().to_lowercase().as_str()),
            _ => false,
        }
    }

    /// String field as stored, if it is a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// String field trimmed and lowercased; empty when absent or not a string.
    pub fn get_text(&self, key: &str) -> String {
        self.get_str(key)
            .map(|s| s.trim().to_lowercase())
            .unwrap_or_default()
    }

    /// Vocabulary field, falling back to `default` when absent or unrecognized.
    pub fn get_enum<E: FromStr>(&self, key: &str, default: E) -> E {
        self.get_str(key)
            .and_then(|s| s.parse().ok())
            .unwrap_or(default)
    }

    /// List-of-strings field.
    ///
    /// Absent reads as an empty list and a bare string as a one-element list.
    /// Returns `None` when the value cannot be read as strings at all (a
    /// number, an object, or a list holding non-strings).
    pub fn try_string_list(&self, key: &str) -> Option<Vec<String>> {
        match self.get(key) {
            None => Some(Vec::new()),
            Some(Value::String(s)) => Some(vec![s.clone()]),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect(),
            Some(_) => None,
        }
    }

    /// List-of-strings field; mistyped values read as empty.
    pub fn string_list(&self, key: &str) -> Vec<String> {
        self.try_string_list(key).unwrap_or_default()
    }

    /// Whether the field holds something "non-empty": a true boolean, a
    /// non-zero number, a non-empty string, list or object.
    pub fn is_truthy(&self, key: &str) -> bool {
        match self.get(key) {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(a)) => !a.is_empty(),
            Some(Value::Object(o)) => !o.is_empty(),
        }
    }

    /// Message of the `error` entry, if the extractor reported a failure.
    ///
    /// A present entry without a usable message reads as `"Unknown error"`.
    pub fn error_message(&self) -> Option<String> {
        let entry = self.fields.get(fields::ERROR)?;
        let message = match entry {
            Value::Object(obj) => obj.get("message").and_then(Value::as_str),
            Value::String(s) => Some(s.as_str()),
            _ => None,
        };
        Some(message.unwrap_or("Unknown error").to_string())
    }

    /// Record who uploaded the asset and when it was described.
    pub fn stamp_provenance(&mut self, uploaded_by: &str, now: Time) {
        self.insert(fields::UPLOADED_BY, uploaded_by);
        self.insert(fields::CREATED_AT, now.to_rfc3339());
    }

    /// Write a verdict into the record as `qc_score`, `qc_decision` and `qc_reasons`.
    pub fn merge_verdict(&mut self, verdict: &Verdict) {
        let score = serde_json::to_value(verdict.score()).unwrap_or(Value::Null);
        self.insert(fields::QC_SCORE, score);
        self.insert(fields::QC_DECISION, verdict.decision().as_str());
        self.insert(fields::QC_REASONS, verdict.reasons().to_vec());
    }

    /// Text used to embed the asset: its summary, or `fallback` when missing.
    pub fn summary_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.get_str(fields::SUMMARY)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(fallback)
    }

    /// Underlying map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
