//! Runtime configuration shared by the collaborators and the CLI.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Errors loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config {path}: {source}")]
    Read {
        /// File that was requested
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Config file is not valid JSON for [`VidqcConfig`]
    #[error("invalid config {path}: {source}")]
    Parse {
        /// File that was requested
        path: PathBuf,
        /// Underlying error
        source: serde_json::Error,
    },

    /// A numeric environment override did not parse
    #[error("invalid value for {var}: {value:?}")]
    InvalidEnv {
        /// Variable name
        var: &'static str,
        /// Offending value
        value: String,
    },
}

/// Configuration for extraction, embedding and storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VidqcConfig {
    /// Generative language API key
    #[serde(default)]
    pub api_key: Option<String>,

    /// API base URL
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Model used to describe media
    #[serde(default = "default_chat_model")]
    pub chat_model: String,

    /// Model used to embed summaries
    #[serde(default = "default_embed_model")]
    pub embed_model: String,

    /// Directory for stored assets
    #[serde(default = "default_storage_path")]
    pub storage_path: PathBuf,

    /// Uploader recorded when the caller names none
    #[serde(default = "default_uploaded_by")]
    pub uploaded_by: String,

    /// HTTP timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_base() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_chat_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_embed_model() -> String {
    "gemini-embedding-001".to_string()
}

fn default_storage_path() -> PathBuf {
    PathBuf::from(".vidqc")
}

fn default_uploaded_by() -> String {
    "unknown".to_string()
}

fn default_timeout_secs() -> u64 {
    300
}

impl Default for VidqcConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: default_api_base(),
            chat_model: default_chat_model(),
            embed_model: default_embed_model(),
            storage_path: default_storage_path(),
            uploaded_by: default_uploaded_by(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl VidqcConfig {
    /// Load from an optional JSON file, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.with_env(|var| std::env::var(var).ok())
    }

    /// Read a JSON config file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply overrides from a variable lookup (the process environment in production).
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        if let Some(key) = lookup("VIDQC_API_KEY").or_else(|| lookup("API_KEY")) {
            self.api_key = Some(key);
        }
        if let Some(base) = lookup("VIDQC_API_BASE") {
            self.api_base = base;
        }
        if let Some(model) = lookup("VIDQC_CHAT_MODEL") {
            self.chat_model = model;
        }
        if let Some(model) = lookup("VIDQC_EMBED_MODEL") {
            self.embed_model = model;
        }
        if let Some(path) = lookup("VIDQC_STORAGE") {
            self.storage_path = PathBuf::from(path);
        }
        if let Some(who) = lookup("VIDQC_UPLOADED_BY") {
            self.uploaded_by = who;
        }
        if let Some(raw) = lookup("VIDQC_TIMEOUT_SECS") {
            self.timeout_secs = raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: "VIDQC_TIMEOUT_SECS",
                value: raw,
            })?;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn test_partial_file_takes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vidqc.json");
        std::fs::write(&path, r#"{"uploaded_by": "studio"}"#).unwrap();

        let config = VidqcConfig::from_file(&path).unwrap();
        assert_eq!(config.uploaded_by, "studio");
        assert_eq!(config.chat_model, "gemini-2.5-flash");
        assert_eq!(config.timeout_secs, 300);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = VidqcConfig::from_file(Path::new("/nonexistent/vidqc.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_env_overrides() {
        let config = VidqcConfig::default()
            .with_env(lookup(&[
                ("API_KEY", "legacy"),
                ("VIDQC_STORAGE", "/data/qc"),
                ("VIDQC_TIMEOUT_SECS", "30"),
            ]))
            .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("legacy"));
        assert_eq!(config.storage_path, PathBuf::from("/data/qc"));
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_prefixed_key_wins() {
        let config = VidqcConfig::default()
            .with_env(lookup(&[("API_KEY", "legacy"), ("VIDQC_API_KEY", "current")]))
            .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("current"));
    }

    #[test]
    fn test_bad_timeout_is_rejected() {
        let err = VidqcConfig::default()
            .with_env(lookup(&[("VIDQC_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { var: "VIDQC_TIMEOUT_SECS", .. }));
    }
}
