//! Quality control decision engine.
//!
//! Hard gates, additive scoring rules, and the engine that folds them into
//! a verdict.

#![warn(missing_docs)]

pub mod engine;
pub mod gate;
pub mod parser;
pub mod rule;
pub mod rules;

pub use engine::{classify, evaluate, DecisionEngine, Evaluation, ACCEPT_THRESHOLD, REJECT_CEILING};
pub use gate::standard_gates;
pub use rule::{Contribution, EvaluationContext, Gate, GateOutcome, ScoringRule};
pub use rules::standard_rules;
