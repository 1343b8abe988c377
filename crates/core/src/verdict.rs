//! Verdict model - the outcome of evaluating one attribute record.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Marker reported in place of a score when a hard gate ended evaluation.
pub const NOT_APPLICABLE: &str = "N/A";

/// Categorical outcome of an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    /// Asset may be published
    Accept,
    /// Asset must not be published
    Reject,
    /// A human has to decide
    ManualReview,
    /// The upstream extractor failed
    Error,
}

impl Decision {
    /// Wire name of the decision.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accept => "ACCEPT",
            Self::Reject => "REJECT",
            Self::ManualReview => "MANUAL_REVIEW",
            Self::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accumulated score, or "N/A" for short-circuited evaluations.
///
/// Serializes as a bare integer or the string `"N/A"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Score {
    /// Sum of all rule contributions
    Points(i32),
    /// A hard gate decided before scoring
    NotApplicable,
}

impl Score {
    /// Points, if scoring ran.
    pub fn points(&self) -> Option<i32> {
        match self {
            Self::Points(p) => Some(*p),
            Self::NotApplicable => None,
        }
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Points(p) => write!(f, "{}", p),
            Self::NotApplicable => f.write_str(NOT_APPLICABLE),
        }
    }
}

impl Serialize for Score {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Points(p) => serializer.serialize_i32(*p),
            Self::NotApplicable => serializer.serialize_str(NOT_APPLICABLE),
        }
    }
}

impl<'de> Deserialize<'de> for Score {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Points(i32),
            Marker(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Points(p) => Ok(Self::Points(p)),
            Raw::Marker(s) if s == NOT_APPLICABLE => Ok(Self::NotApplicable),
            Raw::Marker(s) => Err(serde::de::Error::custom(format!(
                "expected integer score or \"{}\", got {:?}",
                NOT_APPLICABLE, s
            ))),
        }
    }
}

/// The engine's output for one record.
///
/// Fields are read-only once built; the engine never holds on to a verdict
/// after returning it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    score: Score,
    decision: Decision,
    reasons: Vec<String>,
}

impl Verdict {
    /// Verdict for a hard gate: no score and a single reason.
    pub fn halted(decision: Decision, reason: impl Into<String>) -> Self {
        Self {
            score: Score::NotApplicable,
            decision,
            reasons: vec![reason.into()],
        }
    }

    /// Verdict for a fully scored record.
    pub fn scored(points: i32, decision: Decision, reasons: Vec<String>) -> Self {
        Self {
            score: Score::Points(points),
            decision,
            reasons,
        }
    }

    /// Score.
    pub fn score(&self) -> Score {
        self.score
    }

    /// Decision.
    pub fn decision(&self) -> Decision {
        self.decision
    }

    /// Reasons in evaluation order.
    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }
}
