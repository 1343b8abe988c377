//! Hard gates - rules evaluated before scoring that can end an evaluation.
//!
//! Gates run in a fixed order and the first one that halts decides the
//! verdict, with no score. The safety gate is the exception that may also
//! award points when it passes.

use tracing::debug;
use vidqc_core::{fields, AiExtent, AttributeRecord, Decision, Verdict, SAFETY_CATEGORIES};

use crate::parser::parse_duration_secs;
use crate::rule::{Contribution, EvaluationContext, Gate, GateOutcome};

/// Shortest acceptable asset, in seconds.
pub const MIN_DURATION_SECS: f64 = 5.0;

/// Points for a record with no unsafe content.
pub const SAFE_CONTENT_POINTS: i32 = 20;

/// Points computed, then discarded, for fully generated assets.
pub const FULL_AI_POINTS: i32 = -10;

/// Halts with `ERROR` when the extractor reported a failure.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExtractionErrorGate;

impl Gate for ExtractionErrorGate {
    fn name(&self) -> &'static str {
        "extraction_error"
    }

    fn check(&self, record: &AttributeRecord, _ctx: &EvaluationContext) -> GateOutcome {
        match record.error_message() {
            Some(message) => GateOutcome::Halt(Verdict::halted(
                Decision::Error,
                format!("Model error: {}", message),
            )),
            None => GateOutcome::Pass,
        }
    }
}

/// Rejects assets the extractor flagged as having fewer than 10 unique frames.
#[derive(Debug, Default, Clone, Copy)]
pub struct FrameCountGate;

impl Gate for FrameCountGate {
    fn name(&self) -> &'static str {
        "frame_count"
    }

    fn check(&self, record: &AttributeRecord, _ctx: &EvaluationContext) -> GateOutcome {
        if record.get_bool(fields::LESS_THAN_10_FRAMES) {
            GateOutcome::Halt(Verdict::halted(
                Decision::Reject,
                "Rejected: video contains fewer than 10 unique frames",
            ))
        } else {
            GateOutcome::Pass
        }
    }
}

/// Rejects assets shorter than [`MIN_DURATION_SECS`]. Unparseable durations pass.
#[derive(Debug, Default, Clone, Copy)]
pub struct DurationGate;

impl Gate for DurationGate {
    fn name(&self) -> &'static str {
        "duration"
    }

    fn check(&self, record: &AttributeRecord, _ctx: &EvaluationContext) -> GateOutcome {
        let Some(duration) = record.get(fields::DURATION).and_then(parse_duration_secs) else {
            return GateOutcome::Pass;
        };

        if duration < MIN_DURATION_SECS {
            GateOutcome::Halt(Verdict::halted(
                Decision::Reject,
                format!(
                    "Rejected: video too short ({:.2}s < {}s)",
                    duration, MIN_DURATION_SECS
                ),
            ))
        } else {
            GateOutcome::Pass
        }
    }
}

/// Rejects assets with unsafe content; awards [`SAFE_CONTENT_POINTS`] otherwise.
#[derive(Debug, Default, Clone, Copy)]
pub struct SafetyGate;

impl SafetyGate {
    /// Normalized flags of every category whose presence field is affirmative.
    ///
    /// `None` when any category's type list is unreadable.
    pub fn unsafe_flags(record: &AttributeRecord) -> Option<Vec<String>> {
        let mut flags = Vec::new();
        for (presence, kind) in SAFETY_CATEGORIES {
            let types = record.try_string_list(kind)?;
            if record.get_bool(presence) {
                flags.extend(types.iter().map(|t| t.trim().to_lowercase()));
            }
        }
        flags.retain(|f| !f.is_empty());
        Some(flags)
    }
}

impl Gate for SafetyGate {
    fn name(&self) -> &'static str {
        "content_safety"
    }

    fn check(&self, record: &AttributeRecord, _ctx: &EvaluationContext) -> GateOutcome {
        let Some(flags) = Self::unsafe_flags(record) else {
            debug!("Unreadable content-safety types, skipping safety check");
            return GateOutcome::Pass;
        };

        if flags.is_empty() {
            GateOutcome::Award(Contribution::new(
                self.name(),
                SAFE_CONTENT_POINTS,
                "No unsafe content",
            ))
        } else {
            GateOutcome::Halt(Verdict::halted(
                Decision::Reject,
                format!("Unsafe/NSFW content detected: {}", flags.join(", ")),
            ))
        }
    }
}

/// Sends fully generated assets to manual review.
#[derive(Debug, Default, Clone, Copy)]
pub struct AiGenerationGate;

impl Gate for AiGenerationGate {
    fn name(&self) -> &'static str {
        "ai_generation"
    }

    fn check(&self, record: &AttributeRecord, _ctx: &EvaluationContext) -> GateOutcome {
        match record.get_enum(fields::AI_GENERATED_EXTENT, AiExtent::None) {
            AiExtent::Full => {
                // The halted verdict carries no score, so these points never surface.
                let discarded = Contribution::new(self.name(), FULL_AI_POINTS, "Fully AI-generated video");
                debug!(delta = discarded.delta, "{}", discarded);
                GateOutcome::Halt(Verdict::halted(
                    Decision::ManualReview,
                    "The Video is completely AI Generated",
                ))
            }
            AiExtent::Partial => {
                GateOutcome::Award(Contribution::new(self.name(), 0, "Partially AI-generated"))
            }
            AiExtent::None => {
                GateOutcome::Award(Contribution::new(self.name(), 0, "Not AI generation"))
            }
        }
    }
}

/// The hard gates in evaluation order.
pub fn standard_gates() -> Vec<Box<dyn Gate>> {
    vec![
        Box::new(ExtractionErrorGate),
        Box::new(FrameCountGate),
        Box::new(DurationGate),
        Box::new(SafetyGate),
        Box::new(AiGenerationGate),
    ]
}
