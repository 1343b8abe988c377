//! Extract, evaluate and store steps shared by the CLI commands.

use std::path::Path;
use tracing::{info, warn};
use vidqc_core::{AssetId, AttributeRecord, Time, Verdict};
use vidqc_extract::{EmbeddingService, MetadataExtractor};
use vidqc_quality::DecisionEngine;
use vidqc_storage::Storage;

/// Outcome of analysing one media file.
#[derive(Debug)]
pub struct Analysis {
    /// Display name, the file name of the media
    pub name: String,
    /// Extracted record with provenance and verdict merged in
    pub record: AttributeRecord,
    /// Quality verdict
    pub verdict: Verdict,
}

/// Name shown for a media path.
pub fn display_name(media: &Path) -> String {
    media
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| media.display().to_string())
}

/// Extract metadata for `media`, stamp provenance, evaluate and merge the verdict.
pub async fn analyze_media(
    extractor: &dyn MetadataExtractor,
    engine: &DecisionEngine,
    media: &Path,
    uploaded_by: &str,
    now: Time,
) -> Analysis {
    let name = display_name(media);
    let mut record = extractor.extract(media, &name).await;
    record.stamp_provenance(uploaded_by, now);

    let verdict = engine.evaluate_at(&record, now);
    record.merge_verdict(&verdict);

    Analysis {
        name,
        record,
        verdict,
    }
}

/// Embed the record summary (or the name) and persist the asset.
pub async fn store_record<S: Storage>(
    embedder: &dyn EmbeddingService,
    storage: &mut S,
    name: &str,
    record: &AttributeRecord,
) -> anyhow::Result<AssetId> {
    let text = record.summary_or(name);
    let embedding = embedder.embed(text).await?;
    let id = storage.save_asset(name, &embedding, record).await?;
    info!("Stored {} as {}", name, id);
    Ok(id)
}

/// Analyse every file in turn; one failure never stops the rest.
pub async fn analyze_batch<S: Storage>(
    extractor: &dyn MetadataExtractor,
    engine: &DecisionEngine,
    mut store: Option<(&dyn EmbeddingService, &mut S)>,
    media: &[std::path::PathBuf],
    uploaded_by: &str,
    now: Time,
) -> Vec<(Analysis, Option<AssetId>)> {
    let mut results = Vec::with_capacity(media.len());

    for path in media {
        let analysis = analyze_media(extractor, engine, path, uploaded_by, now).await;

        let stored = match store.as_mut() {
            Some((embedder, storage)) => {
                match store_record(*embedder, &mut **storage, &analysis.name, &analysis.record).await {
                    Ok(id) => Some(id),
                    Err(e) => {
                        warn!("Failed to store {}: {:#}", analysis.name, e);
                        None
                    }
                }
            }
            None => None,
        };

        results.push((analysis, stored));
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use serde_json::json;
    use std::path::PathBuf;
    use vidqc_core::{Decision, Score};
    use vidqc_extract::{ExtractError, Result as ExtractResult};
    use vidqc_storage::JsonStorage;

    struct FixedExtractor;

    #[async_trait]
    impl MetadataExtractor for FixedExtractor {
        async fn extract(&self, media: &Path, _display_name: &str) -> AttributeRecord {
            if media.to_string_lossy().contains("broken") {
                return AttributeRecord::from_error("upload failed");
            }
            AttributeRecord::from_value(json!({
                "summary": "Sunny villa tour",
                "video_duration": "1m 10s",
                "is_real_estate_related": "Yes",
                "uae_related": "Yes",
                "uae_sentiment": "Positive",
                "clarity_of_speech": "Clear",
                "volume_balance": "Balanced",
                "subtitles_present": "Yes",
                "technical_glitches": "None",
                "rooms_shown": ["Kitchen"],
            }))
            .unwrap()
        }
    }

    struct LengthEmbedder;

    #[async_trait]
    impl EmbeddingService for LengthEmbedder {
        async fn embed(&self, text: &str) -> ExtractResult<Vec<f32>> {
            if text.is_empty() {
                return Err(ExtractError::MalformedResponse("empty".to_string()));
            }
            Ok(vec![text.len() as f32, 1.0])
        }
    }

    fn now() -> Time {
        chrono::Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_analyze_media_merges_verdict_and_provenance() {
        let engine = DecisionEngine::new();
        let analysis =
            analyze_media(&FixedExtractor, &engine, Path::new("/tmp/villa.mp4"), "ops", now()).await;

        assert_eq!(analysis.name, "villa.mp4");
        assert_eq!(analysis.verdict.decision(), Decision::Accept);
        assert_eq!(analysis.record.get_str("uploaded_by"), Some("ops"));
        assert_eq!(analysis.record.get_str("created_at"), Some("2025-06-01T12:00:00+00:00"));
        assert_eq!(analysis.record.get_str("qc_decision"), Some("ACCEPT"));
    }

    #[tokio::test]
    async fn test_analyze_error_record() {
        let engine = DecisionEngine::new();
        let analysis =
            analyze_media(&FixedExtractor, &engine, Path::new("broken.mp4"), "ops", now()).await;

        assert_eq!(analysis.verdict.decision(), Decision::Error);
        assert_eq!(analysis.verdict.score(), Score::NotApplicable);
        assert_eq!(analysis.verdict.reasons(), ["Model error: upload failed"]);
        assert_eq!(analysis.record.get("qc_score"), Some(&json!("N/A")));
    }

    #[tokio::test]
    async fn test_batch_continues_and_stores() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(dir.path()).await.unwrap();
        let engine = DecisionEngine::new();
        let media = vec![PathBuf::from("broken.mp4"), PathBuf::from("villa.mp4")];

        let results = analyze_batch(
            &FixedExtractor,
            &engine,
            Some((&LengthEmbedder as &dyn EmbeddingService, &mut storage)),
            &media,
            "ops",
            now(),
        )
        .await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0.verdict.decision(), Decision::Error);
        assert!(results.iter().all(|(_, id)| id.is_some()));

        let stored = storage.find_asset("villa.mp4").await.unwrap().unwrap();
        assert_eq!(stored.embedding, vec!["Sunny villa tour".len() as f32, 1.0]);
        assert_eq!(stored.row["qc_decision"], json!("ACCEPT"));

        let fallback = storage.find_asset("broken.mp4").await.unwrap().unwrap();
        assert_eq!(fallback.embedding[0], "broken.mp4".len() as f32);
    }
}
