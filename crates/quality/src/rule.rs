//! Building blocks of an evaluation: gates, scoring rules and their contributions.

use vidqc_core::{AttributeRecord, Time, Verdict};

/// Inputs to an evaluation besides the record itself.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationContext {
    /// Current time, compared against event dates
    pub now: Time,
}

impl EvaluationContext {
    /// Context evaluated at `now`.
    pub fn at(now: Time) -> Self {
        Self { now }
    }

    /// Context evaluated at the current wall-clock time.
    pub fn current() -> Self {
        Self::at(chrono::Utc::now())
    }
}

/// Signed points awarded by one rule, with the reason shown to reviewers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contribution {
    /// Name of the rule that produced it
    pub rule: &'static str,

    /// Point delta
    pub delta: i32,

    /// Human-readable reason, without the delta
    pub label: String,
}

impl Contribution {
    /// Create a contribution.
    pub fn new(rule: &'static str, delta: i32, label: impl Into<String>) -> Self {
        Self {
            rule,
            delta,
            label: label.into(),
        }
    }
}

/// Renders as `"<label> (+N)"`, `"<label> (0)"` or `"<label> (-N)"`.
impl std::fmt::Display for Contribution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.delta > 0 {
            write!(f, "{} (+{})", self.label, self.delta)
        } else {
            write!(f, "{} ({})", self.label, self.delta)
        }
    }
}

/// What a hard gate decided.
#[derive(Debug, Clone, PartialEq)]
pub enum GateOutcome {
    /// No signal; continue with the next gate
    Pass,
    /// Continue, carrying points into the scored total
    Award(Contribution),
    /// Stop evaluating and report this verdict
    Halt(Verdict),
}

/// A rule evaluated before scoring that may end the evaluation.
pub trait Gate: Send + Sync {
    /// Rule name, used in logs and traces.
    fn name(&self) -> &'static str;

    /// Inspect the record.
    fn check(&self, record: &AttributeRecord, ctx: &EvaluationContext) -> GateOutcome;
}

/// An additive scoring rule.
///
/// Returning `None` means the rule has no signal for this record: either it
/// does not apply, or the data it needs is unusable. It never aborts the
/// evaluation.
pub trait ScoringRule: Send + Sync {
    /// Rule name, used in logs and traces.
    fn name(&self) -> &'static str;

    /// Score the record.
    fn score(&self, record: &AttributeRecord, ctx: &EvaluationContext) -> Option<Contribution>;
}
