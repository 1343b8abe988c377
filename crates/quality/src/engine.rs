//! Decision engine - turns an attribute record into a verdict.

use tracing::{debug, info};
use vidqc_core::{fields, AttributeRecord, Decision, Time, Verdict};

use crate::gate::standard_gates;
use crate::rule::{Contribution, EvaluationContext, Gate, GateOutcome, ScoringRule};
use crate::rules::standard_rules;

/// Scores at or above this are accepted.
pub const ACCEPT_THRESHOLD: i32 = 70;

/// Scores at or below this are rejected.
pub const REJECT_CEILING: i32 = 0;

/// A verdict together with the contributions that produced it.
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// Final verdict
    pub verdict: Verdict,

    /// Contributions in evaluation order. Present even when a gate halted,
    /// holding whatever was awarded before the halt.
    pub trace: Vec<Contribution>,

    /// Gate that ended the evaluation, if any
    pub halted_by: Option<&'static str>,
}

/// Map an accumulated score to a decision.
///
/// Accepting requires the asset to be UAE related; otherwise an accept
/// becomes a manual review.
pub fn classify(score: i32, uae_related: bool) -> Decision {
    let decision = if score >= ACCEPT_THRESHOLD {
        Decision::Accept
    } else if score <= REJECT_CEILING {
        Decision::Reject
    } else {
        Decision::ManualReview
    };

    if decision == Decision::Accept && !uae_related {
        Decision::ManualReview
    } else {
        decision
    }
}

/// Quality-control decision engine.
///
/// Stateless: one engine can evaluate any number of records, from any
/// number of threads.
pub struct DecisionEngine {
    gates: Vec<Box<dyn Gate>>,
    rules: Vec<Box<dyn ScoringRule>>,
}

impl DecisionEngine {
    /// Engine with the standard gates and scoring rules.
    pub fn new() -> Self {
        Self::with_rules(standard_gates(), standard_rules())
    }

    /// Engine with custom gates and rules, evaluated in the given order.
    pub fn with_rules(gates: Vec<Box<dyn Gate>>, rules: Vec<Box<dyn ScoringRule>>) -> Self {
        Self { gates, rules }
    }

    /// Evaluate a record at the current time.
    pub fn evaluate(&self, record: &AttributeRecord) -> Verdict {
        self.evaluate_at(record, chrono::Utc::now())
    }

    /// Evaluate a record as of `now`.
    pub fn evaluate_at(&self, record: &AttributeRecord, now: Time) -> Verdict {
        self.evaluate_traced(record, &EvaluationContext::at(now)).verdict
    }

    /// Evaluate a record, keeping the per-rule trace.
    pub fn evaluate_traced(&self, record: &AttributeRecord, ctx: &EvaluationContext) -> Evaluation {
        let mut trace = Vec::new();

        for gate in &self.gates {
            match gate.check(record, ctx) {
                GateOutcome::Pass => {}
                GateOutcome::Award(contribution) => {
                    debug!(gate = gate.name(), delta = contribution.delta, "{}", contribution);
                    trace.push(contribution);
                }
                GateOutcome::Halt(verdict) => {
                    info!(gate = gate.name(), decision = %verdict.decision(), "Evaluation halted by gate");
                    return Evaluation {
                        verdict,
                        trace,
                        halted_by: Some(gate.name()),
                    };
                }
            }
        }

        trace.extend(self.rules.iter().filter_map(|rule| {
            let contribution = rule.score(record, ctx);
            if let Some(c) = &contribution {
                debug!(rule = rule.name(), delta = c.delta, "{}", c);
            }
            contribution
        }));

        let score = trace.iter().fold(0, |total, c| total + c.delta);
        let decision = classify(score, record.get_bool(fields::UAE_RELATED));
        let reasons = trace.iter().map(ToString::to_string).collect();

        info!(score, decision = %decision, "Evaluation complete");
        Evaluation {
            verdict: Verdict::scored(score, decision, reasons),
            trace,
            halted_by: None,
        }
    }
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluate a record with the standard engine at the current time.
pub fn evaluate(record: &AttributeRecord) -> Verdict {
    DecisionEngine::new().evaluate(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::{json, Value};
    use vidqc_core::Score;

    fn now() -> Time {
        chrono::Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn eval(value: Value) -> Verdict {
        DecisionEngine::new().evaluate_at(&AttributeRecord::from_value(value).unwrap(), now())
    }

    fn perfect() -> Value {
        json!({
            "adult_content_presence": "No",
            "is_real_estate_related": "Yes",
            "uae_related": "Yes",
            "uae_sentiment": "Positive",
            "clarity_of_speech": "Clear",
            "volume_balance": "Balanced",
            "mood_of_visuals": "Bright and Modern",
            "subtitles_present": "Yes",
            "rooms_shown": ["Living Room"],
            "technical_glitches": "None"
        })
    }

    fn with(mut base: Value, patch: Value) -> Value {
        if let (Value::Object(b), Value::Object(p)) = (&mut base, patch) {
            b.extend(p);
        }
        base
    }

    #[test]
    fn test_classify_thresholds() {
        assert_eq!(classify(70, true), Decision::Accept);
        assert_eq!(classify(69, true), Decision::ManualReview);
        assert_eq!(classify(1, true), Decision::ManualReview);
        assert_eq!(classify(0, true), Decision::Reject);
        assert_eq!(classify(-200, false), Decision::Reject);
        assert_eq!(classify(135, false), Decision::ManualReview);
    }

    #[test]
    fn test_scenario_few_frames() {
        let verdict = eval(json!({"video_less_than_10_frames": "Yes"}));
        assert_eq!(verdict.score(), Score::NotApplicable);
        assert_eq!(verdict.decision(), Decision::Reject);
        assert_eq!(verdict.reasons(), ["Rejected: video contains fewer than 10 unique frames"]);
    }

    #[test]
    fn test_scenario_short_duration_before_safety() {
        let verdict = eval(json!({
            "video_duration": "3",
            "adult_content_presence": "No",
            "uae_related": "No"
        }));
        assert_eq!(verdict.decision(), Decision::Reject);
        assert_eq!(verdict.score(), Score::NotApplicable);
        assert_eq!(verdict.reasons(), ["Rejected: video too short (3.00s < 5s)"]);
    }

    #[test]
    fn test_scenario_fully_ai_generated() {
        let verdict = eval(json!({"ai_generated_extent": "Full"}));
        assert_eq!(verdict.score(), Score::NotApplicable);
        assert_eq!(verdict.decision(), Decision::ManualReview);
        assert_eq!(verdict.reasons(), ["The Video is completely AI Generated"]);
    }

    #[test]
    fn test_scenario_safety_dominates_perfect_record() {
        let verdict = eval(with(
            perfect(),
            json!({"adult_content_presence": "Yes", "adult_content_type": ["Nudity"]}),
        ));
        assert_eq!(verdict.decision(), Decision::Reject);
        assert_eq!(verdict.score(), Score::NotApplicable);
        assert!(verdict.reasons()[0].contains("nudity"));
    }

    #[test]
    fn test_scenario_perfect_record_accepted() {
        let verdict = eval(perfect());
        assert_eq!(verdict.score(), Score::Points(135));
        assert_eq!(verdict.decision(), Decision::Accept);
        assert_eq!(
            verdict.reasons(),
            [
                "No unsafe content (+20)",
                "Not AI generation (0)",
                "Real estate related (+20)",
                "UAE related (Positive) (+20)",
                "Clear & moderate narration (+10)",
                "Good volume balance (+10)",
                "Good visuals (+10)",
                "Subtitles present (+5)",
                "Property details shown (+20)",
                "Clean technical quality (+20)",
            ]
        );
    }

    #[test]
    fn test_scenario_not_uae_forces_manual_review() {
        let verdict = eval(with(perfect(), json!({"uae_related": "No"})));
        assert_eq!(verdict.score(), Score::Points(115));
        assert_eq!(verdict.decision(), Decision::ManualReview);
        assert!(verdict
            .reasons()
            .contains(&"Not UAE-related → Manual review required (0)".to_string()));
    }

    #[test]
    fn test_error_dominates_everything() {
        let verdict = eval(with(
            perfect(),
            json!({
                "error": {"message": "upstream 503"},
                "video_less_than_10_frames": "Yes",
                "adult_content_presence": "Yes",
                "adult_content_type": ["Nudity"]
            }),
        ));
        assert_eq!(verdict.decision(), Decision::Error);
        assert_eq!(verdict.reasons(), ["Model error: upstream 503"]);
    }

    #[test]
    fn test_exactly_seventy_accepts() {
        // 20 safe + 20 real estate + 20 UAE + 10 clarity + 10 visuals - 10 minor glitches
        let verdict = eval(json!({
            "is_real_estate_related": "Yes",
            "uae_related": "Yes",
            "clarity_of_speech": "Clear",
            "mood_of_visuals": "Luxury",
            "technical_glitches": "Minor"
        }));
        assert_eq!(verdict.score(), Score::Points(70));
        assert_eq!(verdict.decision(), Decision::Accept);
    }

    #[test]
    fn test_sixty_nine_needs_review() {
        struct Offset(i32);
        impl ScoringRule for Offset {
            fn name(&self) -> &'static str {
                "offset"
            }
            fn score(&self, _: &AttributeRecord, _: &EvaluationContext) -> Option<Contribution> {
                Some(Contribution::new("offset", self.0, "Offset"))
            }
        }

        // 20 for safe content plus the offset
        let engine = DecisionEngine::with_rules(standard_gates(), vec![Box::new(Offset(49))]);
        let record = AttributeRecord::from_value(json!({"uae_related": "Yes"})).unwrap();
        let verdict = engine.evaluate_at(&record, now());
        assert_eq!(verdict.score(), Score::Points(69));
        assert_eq!(verdict.decision(), Decision::ManualReview);
    }

    #[test]
    fn test_exactly_zero_rejects() {
        // 20 safe + 20 UAE - 10 narration - 10 visuals - 20 glitches
        let verdict = eval(json!({"uae_related": "Yes", "technical_glitches": "Severe"}));
        assert_eq!(verdict.score(), Score::Points(0));
        assert_eq!(verdict.decision(), Decision::Reject);

        let verdict = eval(json!({"technical_glitches": "Severe"}));
        assert_eq!(verdict.score(), Score::Points(-20));
        assert_eq!(verdict.decision(), Decision::Reject);
    }

    #[test]
    fn test_negative_uae_portrayal() {
        let verdict = eval(with(perfect(), json!({"uae_sentiment": "Negative"})));
        assert_eq!(verdict.score(), Score::Points(15));
        assert_eq!(verdict.decision(), Decision::ManualReview);
        assert!(verdict.reasons().contains(&"Negative portrayal of UAE (-100)".to_string()));
    }

    #[test]
    fn test_past_event_sinks_score() {
        let verdict = eval(with(
            perfect(),
            json!({"event_driven": "Yes", "if_event_yes_time": "2024-12-31"}),
        ));
        assert_eq!(verdict.score(), Score::Points(35));
        assert_eq!(verdict.decision(), Decision::ManualReview);
        assert!(verdict.reasons().contains(&"Past event (-100)".to_string()));
    }

    #[test]
    fn test_unreadable_safety_types_skip_bonus() {
        let verdict = eval(json!({
            "adult_content_presence": "Yes",
            "adult_content_type": {"kind": "nudity"},
            "uae_related": "Yes"
        }));
        // no +20 safety bonus: 20 UAE - 10 clarity - 10 visuals
        assert_eq!(verdict.score(), Score::Points(0));
        assert_eq!(verdict.decision(), Decision::Reject);
        assert!(!verdict.reasons().iter().any(|r| r.starts_with("No unsafe content")));
    }

    #[test]
    fn test_malformed_records_never_panic() {
        let samples = [
            json!({}),
            json!({"video_duration": null, "uae_related": null, "rooms_shown": null}),
            json!({"video_duration": [1, 2], "ai_generated_extent": 3, "main_topic_category": {"a": 1}}),
            json!({"event_driven": true, "if_event_yes_time": {"date": "2025-01-01"}}),
            json!({"subtitles_present": 1.5, "technical_glitches": false, "mood_of_visuals": null}),
            json!({"violence_presence": "Yes", "violence_type": null}),
        ];
        for sample in samples {
            let verdict = eval(sample);
            assert!(!verdict.reasons().is_empty());
        }
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let record = AttributeRecord::from_value(with(
            perfect(),
            json!({"event_driven": "Yes", "if_event_yes_time": "2025-06-10"}),
        ))
        .unwrap();
        let engine = DecisionEngine::new();
        assert_eq!(engine.evaluate_at(&record, now()), engine.evaluate_at(&record, now()));
    }

    #[test]
    fn test_trace_matches_reasons() {
        let record = AttributeRecord::from_value(perfect()).unwrap();
        let evaluation = DecisionEngine::new().evaluate_traced(&record, &EvaluationContext::at(now()));
        assert!(evaluation.halted_by.is_none());
        assert_eq!(evaluation.trace.len(), evaluation.verdict.reasons().len());
        assert_eq!(evaluation.trace[0].rule, "content_safety");
        assert_eq!(evaluation.trace.iter().map(|c| c.delta).sum::<i32>(), 135);
    }

    #[test]
    fn test_trace_reports_halting_gate() {
        let record = AttributeRecord::from_value(json!({"ai_generated_extent": "full"})).unwrap();
        let evaluation = DecisionEngine::new().evaluate_traced(&record, &EvaluationContext::at(now()));
        assert_eq!(evaluation.halted_by, Some("ai_generation"));
        assert_eq!(evaluation.trace.len(), 1);
        assert_eq!(evaluation.trace[0].delta, 20);
    }

    #[test]
    fn test_engine_is_shareable_across_threads() {
        let engine = std::sync::Arc::new(DecisionEngine::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = engine.clone();
                std::thread::spawn(move || {
                    let record = AttributeRecord::from_value(perfect()).unwrap();
                    engine.evaluate_at(&record, now()).decision()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), Decision::Accept);
        }
    }
}
