//! Storage trait abstraction.

use async_trait::async_trait;
use vidqc_core::{AssetId, AttributeRecord, SearchHit, StoredAsset};

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Embedding has no components
    #[error("Empty embedding for {0}")]
    EmptyEmbedding(String),
}

/// Storage abstraction for analysed assets.
///
/// This trait allows different storage backends to be plugged in.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store an asset with its embedding and merged record. Returns the new id.
    ///
    /// Storing the same name twice keeps both rows.
    async fn save_asset(
        &mut self,
        name: &str,
        embedding: &[f32],
        record: &AttributeRecord,
    ) -> Result<AssetId>;

    /// Load an asset by ID.
    async fn load_asset(&self, id: AssetId) -> Result<Option<StoredAsset>>;

    /// Most recently stored asset with this name.
    async fn find_asset(&self, name: &str) -> Result<Option<StoredAsset>>;

    /// List all assets, oldest first.
    async fn list_assets(&self) -> Result<Vec<StoredAsset>>;

    /// The `top_k` assets nearest to `query`, closest first.
    async fn search_nearest(&self, query: &[f32], top_k: usize) -> Result<Vec<SearchHit>>;
}
