//! JSON file storage implementation.
//!
//! Stores one JSON file per asset under `assets/` and keeps small per-asset
//! meta markers (version + updated_at) under `meta/assets/`.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};
use vidqc_core::{AssetId, AttributeRecord, SearchHit, StoredAsset};

use super::{Result, Storage, StorageError};
use crate::row::project_row;
use crate::vector::rank_nearest;

/// File-based JSON storage backend.
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    /// Create storage, creating the `assets/` and `meta/` directories if needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        fs::create_dir_all(root.join("assets")).await?;
        fs::create_dir_all(root.join("meta").join("assets")).await?;

        Ok(Self { root })
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn asset_path(&self, id: AssetId) -> PathBuf {
        self.root.join("assets").join(format!("{}.json", id))
    }

    fn meta_path(&self, id: AssetId) -> PathBuf {
        self.root
            .join("meta")
            .join("assets")
            .join(format!("{}.meta.json", id))
    }

    /// Read and increment the per-asset version, return the new version.
    async fn bump_version(&self, id: AssetId) -> Result<u64> {
        let path = self.meta_path(id);
        let mut version = 0u64;
        if let Ok(s) = fs::read_to_string(&path).await {
            if let Ok(json) = serde_json::from_str::<serde_json::Value>(&s) {
                if let Some(v) = json.get("version").and_then(|v| v.as_u64()) {
                    version = v;
                }
            }
        }
        version += 1;
        let meta = serde_json::json!({"version": version, "updated_at": chrono::Utc::now()});
        fs::write(&path, serde_json::to_string_pretty(&meta)?.as_bytes()).await?;
        Ok(version)
    }
}

#[async_trait::async_trait]
impl Storage for JsonStorage {
    async fn save_asset(
        &mut self,
        name: &str,
        embedding: &[f32],
        record: &AttributeRecord,
    ) -> Result<AssetId> {
        if embedding.is_empty() {
            return Err(StorageError::EmptyEmbedding(name.to_string()));
        }

        let now = chrono::Utc::now();
        let asset = StoredAsset {
            id: AssetId::new(),
            name: name.to_string(),
            embedding: embedding.to_vec(),
            record: record.clone(),
            row: project_row(name, record, now),
            stored_at: now,
        };

        let json = serde_json::to_string_pretty(&asset)?;
        fs::write(self.asset_path(asset.id), json.as_bytes()).await?;
        let version = self.bump_version(asset.id).await?;

        info!("Stored asset {} as {} (v{})", name, asset.id, version);
        Ok(asset.id)
    }

    async fn load_asset(&self, id: AssetId) -> Result<Option<StoredAsset>> {
        read_json(&self.asset_path(id)).await
    }

    async fn find_asset(&self, name: &str) -> Result<Option<StoredAsset>> {
        let assets = self.list_assets().await?;
        Ok(assets.into_iter().rev().find(|a| a.name == name))
    }

    async fn list_assets(&self) -> Result<Vec<StoredAsset>> {
        let mut assets = list_dir(&self.root.join("assets")).await?;
        assets.sort_by(|a: &StoredAsset, b| (a.stored_at, a.id).cmp(&(b.stored_at, b.id)));
        Ok(assets)
    }

    async fn search_nearest(&self, query: &[f32], top_k: usize) -> Result<Vec<SearchHit>> {
        let assets = self.list_assets().await?;
        debug!("Searching {} assets for {} nearest", assets.len(), top_k);
        Ok(rank_nearest(query, assets, top_k))
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn list_dir<T: serde::de::DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
    let mut items = Vec::new();
    let mut rd = fs::read_dir(dir).await?;
    while let Some(entry) = rd.next_entry().await? {
        if entry.path().extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }
        if let Ok(Some(item)) = read_json(&entry.path()).await {
            items.push(item);
        }
    }
    Ok(items)
}
