//! Recognized attribute names and the small vocabularies some of them use.

use serde::{Deserialize, Serialize};

/// Attribute names read by the decision engine or written next to it.
pub mod fields {
    /// Extraction failure sentinel.
    pub const ERROR: &str = "error";
    /// Short title of the asset.
    pub const TITLE: &str = "title";
    /// Free-text summary, also the embedding text.
    pub const SUMMARY: &str = "summary";

    /// Set when the whole video has fewer than 10 unique frames.
    pub const LESS_THAN_10_FRAMES: &str = "video_less_than_10_frames";
    /// Video length, seconds or `2m 45s` style.
    pub const DURATION: &str = "video_duration";

    /// Adult content flag.
    pub const ADULT_PRESENCE: &str = "adult_content_presence";
    /// Kinds of adult content seen.
    pub const ADULT_TYPE: &str = "adult_content_type";
    /// Violence flag.
    pub const VIOLENCE_PRESENCE: &str = "violence_presence";
    /// Kinds of violence seen.
    pub const VIOLENCE_TYPE: &str = "violence_type";
    /// Substance use flag.
    pub const SUBSTANCE_PRESENCE: &str = "substance_use_presence";
    /// Kinds of substance use seen.
    pub const SUBSTANCE_TYPE: &str = "substance_use_type";
    /// Hate speech flag.
    pub const HATE_SPEECH_PRESENCE: &str = "hate_speech_presence";
    /// Kinds of hate speech heard.
    pub const HATE_SPEECH_TYPE: &str = "hate_speech_type";
    /// Disturbing content flag.
    pub const DISTURBING_PRESENCE: &str = "disturbing_content_presence";
    /// Kinds of disturbing content seen.
    pub const DISTURBING_TYPE: &str = "disturbing_content_type";

    /// `None`, `Partial` or `Full`.
    pub const AI_GENERATED_EXTENT: &str = "ai_generated_extent";
    /// Whether the asset is about real estate.
    pub const REAL_ESTATE_RELATED: &str = "is_real_estate_related";
    /// Main topic category, e.g. `Lifestyle`.
    pub const MAIN_TOPIC: &str = "main_topic_category";
    /// Lifestyle angle, empty when none.
    pub const LIFESTYLE_EMPHASIS: &str = "lifestyle_emphasis";
    /// Whether a UAE place or landmark features.
    pub const UAE_RELATED: &str = "uae_related";
    /// Portrayal of the UAE.
    pub const UAE_SENTIMENT: &str = "uae_sentiment";
    /// Whether the asset promotes an event.
    pub const EVENT_DRIVEN: &str = "event_driven";
    /// When the promoted event takes place.
    pub const EVENT_TIME: &str = "if_event_yes_time";
    /// Narration clarity.
    pub const CLARITY_OF_SPEECH: &str = "clarity_of_speech";
    /// Narration against music balance.
    pub const VOLUME_BALANCE: &str = "volume_balance";
    /// Free-text description of the look.
    pub const MOOD_OF_VISUALS: &str = "mood_of_visuals";
    /// Subtitle flag.
    pub const SUBTITLES_PRESENT: &str = "subtitles_present";
    /// Rooms of the property on screen.
    pub const ROOMS_SHOWN: &str = "rooms_shown";
    /// `None`, `Minor` or `Severe`.
    pub const TECHNICAL_GLITCHES: &str = "technical_glitches";

    /// Who submitted the asset.
    pub const UPLOADED_BY: &str = "uploaded_by";
    /// When the record was extracted (RFC 3339).
    pub const CREATED_AT: &str = "created_at";
    /// Merged verdict score.
    pub const QC_SCORE: &str = "qc_score";
    /// Merged verdict decision.
    pub const QC_DECISION: &str = "qc_decision";
    /// Merged verdict reasons.
    pub const QC_REASONS: &str = "qc_reasons";
}

/// Presence/type field pairs of the content-safety categories, in check order.
pub const SAFETY_CATEGORIES: [(&str, &str); 5] = [
    (fields::ADULT_PRESENCE, fields::ADULT_TYPE),
    (fields::VIOLENCE_PRESENCE, fields::VIOLENCE_TYPE),
    (fields::SUBSTANCE_PRESENCE, fields::SUBSTANCE_TYPE),
    (fields::HATE_SPEECH_PRESENCE, fields::HATE_SPEECH_TYPE),
    (fields::DISTURBING_PRESENCE, fields::DISTURBING_TYPE),
];

/// How much of the asset the extractor believes is machine generated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiExtent {
    /// Nothing generated
    #[default]
    None,
    /// Some generated footage or voice
    Partial,
    /// Entirely generated
    Full,
}

impl std::str::FromStr for AiExtent {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "partial" => Ok(Self::Partial),
            "full" => Ok(Self::Full),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// Portrayal of the UAE in the asset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    /// Favourable portrayal
    Positive,
    /// Neither favourable nor unfavourable
    #[default]
    Neutral,
    /// Unfavourable portrayal
    Negative,
}

impl std::str::FromStr for Sentiment {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Ok(Self::Positive),
            "neutral" => Ok(Self::Neutral),
            "negative" => Ok(Self::Negative),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Positive => "Positive",
            Self::Neutral => "Neutral",
            Self::Negative => "Negative",
        };
        f.write_str(label)
    }
}

/// A value that is not part of an attribute vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown variant: {0:?}")]
pub struct UnknownVariant(pub String);
