//! Parsing of generative model responses into attribute records.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use vidqc_core::{fields, AttributeRecord};

/// Characters of raw text kept as summary when no JSON can be recovered.
pub const FALLBACK_SUMMARY_CHARS: usize = 500;

fn object_span() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s)\{.*\}").ok()).as_ref()
}

/// Turn model output into a record.
///
/// Tries the whole text as a JSON object, then the outermost `{...}` span
/// (models like to wrap JSON in prose or code fences). If neither parses,
/// the record is just the asset name as title and the start of the text as
/// summary.
pub fn parse_model_response(text: &str, asset_name: &str) -> AttributeRecord {
    if let Some(record) = parse_object(text) {
        return record;
    }

    if let Some(span) = object_span().and_then(|re| re.find(text)) {
        if let Some(record) = parse_object(span.as_str()) {
            return record;
        }
    }

    tracing::warn!("Model response for {} is not JSON, keeping it as summary", asset_name);
    let mut record = AttributeRecord::new();
    record.insert(fields::TITLE, asset_name);
    record.insert(
        fields::SUMMARY,
        text.trim().chars().take(FALLBACK_SUMMARY_CHARS).collect::<String>(),
    );
    record
}

fn parse_object(text: &str) -> Option<AttributeRecord> {
    serde_json::from_str::<Value>(text)
        .ok()
        .and_then(AttributeRecord::from_value)
}

/// Text of the first candidate in a `generateContent` response body.
pub fn candidate_text(body: &Value) -> Option<&str> {
    body.get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .get(0)?
        .get("text")?
        .as_str()
}

/// Error message from an API error body, falling back to the raw body.
pub fn api_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.pointer("/error/message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
