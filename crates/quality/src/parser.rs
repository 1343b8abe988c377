//! Parsing of free-text attribute values: durations and event dates.
//!
//! Both parsers return `None` instead of failing; callers treat that as "no
//! signal" for the rule that asked.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use regex::Regex;
use serde_json::Value as JsonValue;
use std::sync::OnceLock;
use vidqc_core::Time;

fn clock_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(r"^(?:(\d+(?:\.\d+)?)\s*h)?\s*(?:(\d+(?:\.\d+)?)\s*m)?\s*(?:(\d+(?:\.\d+)?)\s*s)?$").ok()
        })
        .as_ref()
}

/// Parse a duration in seconds.
///
/// Accepts JSON numbers, numeric strings (`"3"`, `"12.5"`) and the
/// `"2m 45s"` / `"1h 2m"` / `"40s"` forms extractors are asked to produce.
pub fn parse_duration_secs(value: &JsonValue) -> Option<f64> {
    match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => parse_duration_text(s),
        _ => None,
    }
}

fn parse_duration_text(raw: &str) -> Option<f64> {
    let text = raw.trim().to_lowercase();
    if text.is_empty() {
        return None;
    }
    if let Ok(secs) = text.parse::<f64>() {
        return Some(secs);
    }

    let caps = clock_pattern()?.captures(&text)?;
    let unit = |idx: usize| -> Option<f64> { caps.get(idx).and_then(|m| m.as_str().parse().ok()) };
    let (hours, minutes, seconds) = (unit(1), unit(2), unit(3));
    if hours.is_none() && minutes.is_none() && seconds.is_none() {
        return None;
    }
    Some(hours.unwrap_or(0.0) * 3600.0 + minutes.unwrap_or(0.0) * 60.0 + seconds.unwrap_or(0.0))
}

const NAIVE_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601 event time.
///
/// Offsets are honoured; timestamps without one, and bare dates (read as
/// midnight), are taken as UTC.
pub fn parse_event_time(raw: &str) -> Option<Time> {
    let text = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}
