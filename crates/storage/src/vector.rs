//! Nearest-neighbour ranking over stored embeddings.

use tracing::warn;
use vidqc_core::{SearchHit, StoredAsset};

/// Euclidean (L2) distance between two vectors of equal length.
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f32>()
        .sqrt()
}

/// Rank assets by distance to `query` and keep the closest `top_k`.
///
/// Assets whose embedding dimension differs from the query are skipped.
pub fn rank_nearest(query: &[f32], assets: Vec<StoredAsset>, top_k: usize) -> Vec<SearchHit> {
    let mut scored: Vec<_> = assets
        .into_iter()
        .filter(|asset| {
            let matches = asset.embedding.len() == query.len();
            if !matches {
                warn!(
                    "Skipping {} ({}): embedding has {} dimensions, query has {}",
                    asset.name,
                    asset.id,
                    asset.embedding.len(),
                    query.len()
                );
            }
            matches
        })
        .map(|asset| {
            let distance = euclidean_distance(query, &asset.embedding);
            SearchHit {
                name: asset.name,
                record: asset.record,
                distance,
            }
        })
        .collect();

    scored.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(top_k);
    scored
}
