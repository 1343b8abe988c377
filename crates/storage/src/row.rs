//! Typed reporting row projected from an attribute record.
//!
//! The stored record keeps whatever the extractor returned. The row is the
//! flattened, typed view used for reporting: yes/no columns become booleans,
//! list columns become arrays, reasons become one string.

use serde_json::{Map, Value};
use vidqc_core::{fields, AttributeRecord, Time};

/// Columns copied into the row, in order.
pub const ROW_COLUMNS: &[&str] = &[
    "video_name", "title", "category", "tags", "summary",
    "adult_content_presence", "adult_content_type", "is_real_estate_related",
    "main_topic_category", "speaker_presence", "location", "speaker_gender",
    "speaker_age_range", "speaker_accent", "speaker_race", "ai_voice_presence",
    "ai_visuals_presence", "primary_language_spoken", "secondary_languages_spoken",
    "voice_tone", "speech_speed", "clarity_of_speech", "narration_style",
    "background_music_presence", "music_mood", "music_type", "volume_balance",
    "property_type", "property_condition", "furnishing_level", "view_type",
    "indoor_vs_outdoor_focus", "rooms_shown", "outdoor_amenities", "appliances_brands",
    "category_of_brand", "indoor_amenities", "luxury_cues", "space_perception",
    "mood_of_visuals", "aesthetic_style", "shot_type", "storytelling_style",
    "focus_balance", "primary_intent", "secondary_intent", "emotional_appeal",
    "urgency_cues", "event_driven", "if_event_yes_time", "investment_pitch_signals",
    "call_to_action_presence", "call_to_action_type", "text_overlays", "logo_watermark",
    "price_shown", "price", "offer_mentioned", "contact_info_shown",
    "agent_branding_visible", "developer_branding_visible", "exclusivity_claim",
    "hook_strength", "first_5s_focus", "subtitles_present", "subtitles_languages",
    "activities_shown", "lifestyle_emphasis", "technical_glitches",
    "qc_score", "qc_decision", "qc_reasons",
    "uploaded_by", "created_at",
];

/// Columns stored as booleans.
pub const BOOL_COLUMNS: &[&str] = &[
    "adult_content_presence", "is_real_estate_related", "speaker_presence",
    "ai_voice_presence", "ai_visuals_presence", "background_music_presence",
    "event_driven", "call_to_action_presence", "logo_watermark",
    "price_shown", "contact_info_shown", "agent_branding_visible",
    "developer_branding_visible", "subtitles_present",
];

/// Columns stored as arrays.
pub const LIST_COLUMNS: &[&str] = &[
    "tags", "adult_content_type", "secondary_languages_spoken",
    "outdoor_amenities", "subtitles_languages", "activities_shown",
    "rooms_shown", "indoor_amenities", "shot_type", "luxury_cues", "text_overlays",
    "appliances_brands",
];

/// Uploader recorded when the record names none.
pub const DEFAULT_UPLOADER: &str = "unknown";

/// Project a record into a typed row for asset `name`, stored at `now`.
pub fn project_row(name: &str, record: &AttributeRecord, now: Time) -> Map<String, Value> {
    ROW_COLUMNS
        .iter()
        .map(|&column| (column.to_string(), column_value(column, name, record, now)))
        .collect()
}

fn column_value(column: &str, name: &str, record: &AttributeRecord, now: Time) -> Value {
    let raw = record.get(column).cloned().unwrap_or(Value::Null);

    match column {
        "video_name" => Value::String(name.to_string()),
        c if c == fields::UPLOADED_BY => match raw {
            Value::Null => Value::String(DEFAULT_UPLOADER.to_string()),
            other => other,
        },
        c if c == fields::CREATED_AT => {
            let parsed = raw
                .as_str()
                .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
                .map(|dt| dt.with_timezone(&chrono::Utc))
                .unwrap_or(now);
            Value::String(parsed.to_rfc3339())
        }
        c if c == fields::QC_REASONS => match raw {
            Value::Array(items) => Value::String(
                items
                    .iter()
                    .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            other => other,
        },
        c if BOOL_COLUMNS.contains(&c) => Value::Bool(as_bool(&raw)),
        c if LIST_COLUMNS.contains(&c) => Value::Array(as_list(raw)),
        _ => raw,
    }
}

/// Strings are true only for "yes"; other values use their truthiness.
fn as_bool(value: &Value) -> bool {
    match value {
        Value::String(s) => s.trim().eq_ignore_ascii_case("yes"),
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
        Value::Null => false,
    }
}

/// Strings holding JSON are decoded; other strings are split on commas.
fn as_list(value: Value) -> Vec<Value> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items,
        Value::String(s) => match serde_json::from_str::<Value>(&s) {
            Ok(Value::Array(items)) => items,
            Ok(other) => vec![other],
            Err(_) => s
                .split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(|part| Value::String(part.to_string()))
                .collect(),
        },
        other => vec![other],
    }
}
