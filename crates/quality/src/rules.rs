//! Additive scoring rules.
//!
//! Each rule looks at one aspect of the record and returns at most one
//! contribution. Rules are independent: none reads another's output.

use vidqc_core::{fields, AttributeRecord, Sentiment};

use crate::parser::parse_event_time;
use crate::rule::{Contribution, EvaluationContext, ScoringRule};

const REAL_ESTATE_TOPICS: [&str; 2] = ["real estate", "property"];
const UAE_PLACES: [&str; 4] = ["uae", "dubai", "abu dhabi", "sharjah"];
const GOOD_VISUAL_CUES: [&str; 5] = ["clear", "bright", "modern", "luxury", "well-lit"];

/// Real-estate or UAE-lifestyle subject matter.
#[derive(Debug, Default, Clone, Copy)]
pub struct RelevanceRule;

impl ScoringRule for RelevanceRule {
    fn name(&self) -> &'static str {
        "relevance"
    }

    fn score(&self, record: &AttributeRecord, _ctx: &EvaluationContext) -> Option<Contribution> {
        let topic = record.get_text(fields::MAIN_TOPIC);

        if record.get_bool(fields::REAL_ESTATE_RELATED) || REAL_ESTATE_TOPICS.contains(&topic.as_str()) {
            return Some(Contribution::new(self.name(), 20, "Real estate related"));
        }

        let emphasis = record.get_text(fields::LIFESTYLE_EMPHASIS);
        if topic == "lifestyle" && UAE_PLACES.iter().any(|place| emphasis.contains(place)) {
            return Some(Contribution::new(self.name(), 10, "UAE lifestyle content"));
        }

        None
    }
}

/// Whether, and how favourably, the asset features the UAE.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegionalRule;

impl ScoringRule for RegionalRule {
    fn name(&self) -> &'static str {
        "regional_relevance"
    }

    fn score(&self, record: &AttributeRecord, _ctx: &EvaluationContext) -> Option<Contribution> {
        if !record.get_bool(fields::UAE_RELATED) {
            return Some(Contribution::new(
                self.name(),
                0,
                "Not UAE-related → Manual review required",
            ));
        }

        let raw = record.get_text(fields::UAE_SENTIMENT);
        let label = match raw.parse::<Sentiment>() {
            Ok(Sentiment::Negative) => {
                return Some(Contribution::new(self.name(), -100, "Negative portrayal of UAE"))
            }
            Ok(sentiment) => sentiment.to_string(),
            Err(_) if raw.is_empty() => Sentiment::Neutral.to_string(),
            Err(_) => capitalize(&raw),
        };

        Some(Contribution::new(self.name(), 20, format!("UAE related ({})", label)))
    }
}

/// First character uppercased, the rest as given.
fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Event-driven assets must point at an event that has not happened yet.
#[derive(Debug, Default, Clone, Copy)]
pub struct EventRule;

impl ScoringRule for EventRule {
    fn name(&self) -> &'static str {
        "event_validity"
    }

    fn score(&self, record: &AttributeRecord, ctx: &EvaluationContext) -> Option<Contribution> {
        if !record.get_bool(fields::EVENT_DRIVEN) {
            return None;
        }

        if !record.is_truthy(fields::EVENT_TIME) {
            return Some(Contribution::new(self.name(), -10, "Event flagged but time missing"));
        }

        let parsed = record.get_str(fields::EVENT_TIME).and_then(parse_event_time);
        match parsed {
            Some(at) if at < ctx.now => Some(Contribution::new(self.name(), -100, "Past event")),
            Some(_) => Some(Contribution::new(self.name(), 15, "Upcoming/live event")),
            None => Some(Contribution::new(self.name(), 0, "Invalid event time format")),
        }
    }
}

/// Narration must be clear.
#[derive(Debug, Default, Clone, Copy)]
pub struct NarrationRule;

impl ScoringRule for NarrationRule {
    fn name(&self) -> &'static str {
        "narration_clarity"
    }

    fn score(&self, record: &AttributeRecord, _ctx: &EvaluationContext) -> Option<Contribution> {
        if record.get_text(fields::CLARITY_OF_SPEECH) == "clear" {
            Some(Contribution::new(self.name(), 10, "Clear & moderate narration"))
        } else {
            Some(Contribution::new(self.name(), -10, "Unclear/missing narration"))
        }
    }
}

/// Music should not drown out narration.
#[derive(Debug, Default, Clone, Copy)]
pub struct VolumeRule;

impl ScoringRule for VolumeRule {
    fn name(&self) -> &'static str {
        "volume_balance"
    }

    fn score(&self, record: &AttributeRecord, _ctx: &EvaluationContext) -> Option<Contribution> {
        match record.get_text(fields::VOLUME_BALANCE).as_str() {
            "narration-dominant" | "balanced" => {
                Some(Contribution::new(self.name(), 10, "Good volume balance"))
            }
            "music-dominant" => Some(Contribution::new(self.name(), -5, "Music too loud")),
            _ => None,
        }
    }
}

/// Visual mood described with at least one positive cue.
#[derive(Debug, Default, Clone, Copy)]
pub struct VisualsRule;

impl ScoringRule for VisualsRule {
    fn name(&self) -> &'static str {
        "visual_quality"
    }

    fn score(&self, record: &AttributeRecord, _ctx: &EvaluationContext) -> Option<Contribution> {
        let mood = record.get_text(fields::MOOD_OF_VISUALS);
        if GOOD_VISUAL_CUES.iter().any(|cue| mood.contains(cue)) {
            Some(Contribution::new(self.name(), 10, "Good visuals"))
        } else {
            Some(Contribution::new(self.name(), -10, "Poor/unclear visuals"))
        }
    }
}

/// Burned-in or sidecar subtitles are present.
#[derive(Debug, Default, Clone, Copy)]
pub struct SubtitlesRule;

impl ScoringRule for SubtitlesRule {
    fn name(&self) -> &'static str {
        "subtitles"
    }

    fn score(&self, record: &AttributeRecord, _ctx: &EvaluationContext) -> Option<Contribution> {
        record
            .get_bool(fields::SUBTITLES_PRESENT)
            .then(|| Contribution::new(self.name(), 5, "Subtitles present"))
    }
}

/// Rooms of the property are shown.
#[derive(Debug, Default, Clone, Copy)]
pub struct PropertyDetailRule;

impl ScoringRule for PropertyDetailRule {
    fn name(&self) -> &'static str {
        "property_details"
    }

    fn score(&self, record: &AttributeRecord, _ctx: &EvaluationContext) -> Option<Contribution> {
        let shown = match record.get(fields::ROOMS_SHOWN) {
            Some(serde_json::Value::Array(rooms)) => !rooms.is_empty(),
            Some(serde_json::Value::String(rooms)) => !rooms.trim().is_empty(),
            _ => false,
        };
        shown.then(|| Contribution::new(self.name(), 20, "Property details shown"))
    }
}

/// Glitch severity reported by the extractor.
#[derive(Debug, Default, Clone, Copy)]
pub struct TechnicalRule;

impl ScoringRule for TechnicalRule {
    fn name(&self) -> &'static str {
        "technical_quality"
    }

    fn score(&self, record: &AttributeRecord, _ctx: &EvaluationContext) -> Option<Contribution> {
        match record.get_text(fields::TECHNICAL_GLITCHES).as_str() {
            "none" | "no" | "clean" => {
                Some(Contribution::new(self.name(), 20, "Clean technical quality"))
            }
            "minor" => Some(Contribution::new(self.name(), -10, "Minor technical glitches")),
            "severe" | "yes" => Some(Contribution::new(self.name(), -20, "Severe technical glitches")),
            _ => None,
        }
    }
}

/// The scoring rules in evaluation order.
pub fn standard_rules() -> Vec<Box<dyn ScoringRule>> {
    vec![
        Box::new(RelevanceRule),
        Box::new(RegionalRule),
        Box::new(EventRule),
        Box::new(NarrationRule),
        Box::new(VolumeRule),
        Box::new(VisualsRule),
        Box::new(SubtitlesRule),
        Box::new(PropertyDetailRule),
        Box::new(TechnicalRule),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn ctx() -> EvaluationContext {
        EvaluationContext::at(chrono::Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap())
    }

    fn score(rule: &dyn ScoringRule, value: serde_json::Value) -> Option<(i32, String)> {
        let record = AttributeRecord::from_value(value).unwrap();
        rule.score(&record, &ctx()).map(|c| (c.delta, c.to_string()))
    }

    #[test]
    fn test_relevance_real_estate() {
        assert_eq!(
            score(&RelevanceRule, json!({"is_real_estate_related": "Yes"})),
            Some((20, "Real estate related (+20)".into()))
        );
        assert_eq!(score(&RelevanceRule, json!({"main_topic_category": " Property "})).map(|s| s.0), Some(20));
        assert_eq!(score(&RelevanceRule, json!({"main_topic_category": "Real Estate"})).map(|s| s.0), Some(20));
    }

    #[test]
    fn test_relevance_uae_lifestyle() {
        assert_eq!(
            score(
                &RelevanceRule,
                json!({"main_topic_category": "Lifestyle", "lifestyle_emphasis": "Beach life in Dubai Marina"})
            ),
            Some((10, "UAE lifestyle content (+10)".into()))
        );
        assert_eq!(
            score(&RelevanceRule, json!({"main_topic_category": "Lifestyle", "lifestyle_emphasis": "Paris cafes"})),
            None
        );
        assert_eq!(
            score(&RelevanceRule, json!({"main_topic_category": "Travel", "lifestyle_emphasis": "Dubai"})),
            None
        );
    }

    #[test]
    fn test_regional_rule() {
        assert_eq!(
            score(&RegionalRule, json!({"uae_related": "Yes", "uae_sentiment": "Negative"})),
            Some((-100, "Negative portrayal of UAE (-100)".into()))
        );
        assert_eq!(
            score(&RegionalRule, json!({"uae_related": "Yes", "uae_sentiment": "positive"})),
            Some((20, "UAE related (Positive) (+20)".into()))
        );
        assert_eq!(
            score(&RegionalRule, json!({"uae_related": true})),
            Some((20, "UAE related (Neutral) (+20)".into()))
        );
        assert_eq!(
            score(&RegionalRule, json!({"uae_related": "No"})),
            Some((0, "Not UAE-related → Manual review required (0)".into()))
        );
    }

    #[test]
    fn test_regional_rule_echoes_unknown_sentiment() {
        assert_eq!(
            score(&RegionalRule, json!({"uae_related": "Yes", "uae_sentiment": "  MIXED "})),
            Some((20, "UAE related (Mixed) (+20)".into()))
        );
        assert_eq!(
            score(&RegionalRule, json!({"uae_related": "Yes", "uae_sentiment": "   "})),
            Some((20, "UAE related (Neutral) (+20)".into()))
        );
    }

    #[test]
    fn test_event_rule_skipped_when_not_event_driven() {
        assert_eq!(score(&EventRule, json!({"if_event_yes_time": "2020-01-01"})), None);
        assert_eq!(score(&EventRule, json!({"event_driven": "No"})), None);
    }

    #[test]
    fn test_event_rule_outcomes() {
        assert_eq!(
            score(&EventRule, json!({"event_driven": "Yes", "if_event_yes_time": "2025-05-31"})),
            Some((-100, "Past event (-100)".into()))
        );
        assert_eq!(
            score(&EventRule, json!({"event_driven": "Yes", "if_event_yes_time": "2025-06-02"})),
            Some((15, "Upcoming/live event (+15)".into()))
        );
        assert_eq!(
            score(&EventRule, json!({"event_driven": "Yes", "if_event_yes_time": "2025-06-01T12:00:00Z"})),
            Some((15, "Upcoming/live event (+15)".into()))
        );
        assert_eq!(
            score(&EventRule, json!({"event_driven": "Yes", "if_event_yes_time": "soon"})),
            Some((0, "Invalid event time format (0)".into()))
        );
        assert_eq!(
            score(&EventRule, json!({"event_driven": "Yes", "if_event_yes_time": 20250601})),
            Some((0, "Invalid event time format (0)".into()))
        );
    }

    #[test]
    fn test_event_rule_missing_time() {
        for value in [json!({"event_driven": "Yes"}), json!({"event_driven": "Yes", "if_event_yes_time": ""})] {
            assert_eq!(score(&EventRule, value), Some((-10, "Event flagged but time missing (-10)".into())));
        }
    }

    #[test]
    fn test_narration_rule() {
        assert_eq!(score(&NarrationRule, json!({"clarity_of_speech": "Clear"})).map(|s| s.0), Some(10));
        assert_eq!(score(&NarrationRule, json!({"clarity_of_speech": "Clear but fast"})).map(|s| s.0), Some(-10));
        assert_eq!(score(&NarrationRule, json!({})).map(|s| s.0), Some(-10));
    }

    #[test]
    fn test_volume_rule() {
        assert_eq!(score(&VolumeRule, json!({"volume_balance": "Balanced"})).map(|s| s.0), Some(10));
        assert_eq!(score(&VolumeRule, json!({"volume_balance": "Narration-dominant"})).map(|s| s.0), Some(10));
        assert_eq!(
            score(&VolumeRule, json!({"volume_balance": "Music-dominant"})),
            Some((-5, "Music too loud (-5)".into()))
        );
        assert_eq!(score(&VolumeRule, json!({"volume_balance": "Quiet"})), None);
    }

    #[test]
    fn test_visuals_rule() {
        assert_eq!(score(&VisualsRule, json!({"mood_of_visuals": "Bright and Modern"})).map(|s| s.0), Some(10));
        assert_eq!(score(&VisualsRule, json!({"mood_of_visuals": "Well-lit interiors"})).map(|s| s.0), Some(10));
        assert_eq!(score(&VisualsRule, json!({"mood_of_visuals": "Dim"})).map(|s| s.0), Some(-10));
        assert_eq!(score(&VisualsRule, json!({"mood_of_visuals": ["Bright"]})).map(|s| s.0), Some(-10));
    }

    #[test]
    fn test_subtitles_rule() {
        assert_eq!(score(&SubtitlesRule, json!({"subtitles_present": "Yes"})).map(|s| s.0), Some(5));
        assert_eq!(score(&SubtitlesRule, json!({"subtitles_present": "No"})), None);
    }

    #[test]
    fn test_property_detail_rule() {
        assert_eq!(score(&PropertyDetailRule, json!({"rooms_shown": ["Kitchen"]})).map(|s| s.0), Some(20));
        assert_eq!(score(&PropertyDetailRule, json!({"rooms_shown": "Kitchen"})).map(|s| s.0), Some(20));
        assert_eq!(score(&PropertyDetailRule, json!({"rooms_shown": []})), None);
        assert_eq!(score(&PropertyDetailRule, json!({"rooms_shown": "   "})), None);
        assert_eq!(score(&PropertyDetailRule, json!({"rooms_shown": 3})), None);
    }

    #[test]
    fn test_technical_rule() {
        assert_eq!(score(&TechnicalRule, json!({"technical_glitches": "None"})).map(|s| s.0), Some(20));
        assert_eq!(score(&TechnicalRule, json!({"technical_glitches": "clean"})).map(|s| s.0), Some(20));
        assert_eq!(score(&TechnicalRule, json!({"technical_glitches": "Minor"})).map(|s| s.0), Some(-10));
        assert_eq!(score(&TechnicalRule, json!({"technical_glitches": "Severe"})).map(|s| s.0), Some(-20));
        assert_eq!(score(&TechnicalRule, json!({"technical_glitches": "yes"})).map(|s| s.0), Some(-20));
        assert_eq!(score(&TechnicalRule, json!({"technical_glitches": "unknown"})), None);
    }
}
