//! Stored asset model - what the persistence layer keeps per analysed file.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::id::AssetId;
use crate::record::AttributeRecord;
use crate::Time;

/// An analysed asset with its embedding and merged verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredAsset {
    /// Unique identifier
    pub id: AssetId,

    /// Display name (usually the uploaded file name)
    pub name: String,

    /// Embedding of the asset summary
    pub embedding: Vec<f32>,

    /// Full attribute record, verdict merged in
    pub record: AttributeRecord,

    /// Typed projection of the record used for reporting
    #[serde(default)]
    pub row: Map<String, Value>,

    /// When it was stored
    pub stored_at: Time,
}

/// One nearest-neighbour result.
#[derive(Debug, Clone)]
pub struct SearchHit {
    /// Display name of the asset
    pub name: String,

    /// Its attribute record
    pub record: AttributeRecord,

    /// Euclidean distance to the query (lower is closer)
    pub distance: f32,
}
