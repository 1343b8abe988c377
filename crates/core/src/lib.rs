//! vidqc core data models.
//!
//! This crate defines the attribute record handed over by extractors, the
//! verdict produced by the decision engine, and the models shared by the
//! storage and CLI layers.

#![warn(missing_docs)]

// Core identities
mod id;

// Records and verdicts
pub mod record;
mod verdict;
pub mod vocab;

// Persistence and configuration
mod asset;
mod config;

// Re-exports
pub use id::*;

pub use record::{AttributeRecord, normalize_key, AFFIRMATIVE};
pub use verdict::{Decision, Score, Verdict, NOT_APPLICABLE};
pub use vocab::{fields, AiExtent, Sentiment, UnknownVariant, SAFETY_CATEGORIES};

pub use asset::{SearchHit, StoredAsset};
pub use config::{ConfigError, VidqcConfig};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
