//! Unique identifiers for stored assets.

use serde::{Deserialize, Serialize};
use std::sync::{Mutex, OnceLock};
use ulid::{Generator, Ulid};

/// Unique identifier for a stored asset.
///
/// Several stored rows may share a display name (re-uploads of the same
/// file); the id is what tells them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetId(Ulid);

impl AssetId {
    /// Generate a new AssetId, strictly greater than every id minted before
    /// it in this process, even within the same millisecond.
    pub fn new() -> Self {
        static GENERATOR: OnceLock<Mutex<Generator>> = OnceLock::new();
        let generator = GENERATOR.get_or_init(|| Mutex::new(Generator::new()));
        let next = generator
            .lock()
            .ok()
            .and_then(|mut g| g.generate().ok());
        Self(next.unwrap_or_else(Ulid::new))
    }
}

impl Default for AssetId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for AssetId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_id_roundtrips_through_display() {
        let id = AssetId::new();
        let parsed: AssetId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_asset_id_rejects_garbage() {
        assert!("not-a-ulid".parse::<AssetId>().is_err());
    }

    #[test]
    fn test_asset_ids_are_ordered_by_creation() {
        let ids: Vec<_> = (0..1000).map(|_| AssetId::new()).collect();
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
