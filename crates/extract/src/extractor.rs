//! Metadata extraction from media files.

use async_trait::async_trait;
use base64::Engine as _;
use serde_json::{json, Value};
use std::path::Path;
use tracing::{info, warn};
use vidqc_core::AttributeRecord;

use crate::error::{ExtractError, Result};
use crate::gemini::GeminiClient;
use crate::prompt::METADATA_PROMPT;
use crate::response::{candidate_text, parse_model_response};

/// Produces an attribute record for a media file.
///
/// Never fails: any problem is reported as a record carrying an `error`
/// entry, which the quality engine turns into an `ERROR` verdict.
#[async_trait]
pub trait MetadataExtractor: Send + Sync {
    /// Describe the media at `media`, naming it `display_name`.
    async fn extract(&self, media: &Path, display_name: &str) -> AttributeRecord;
}

/// MIME type sent with inline media, chosen by file extension.
pub fn mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("mov") => "video/quicktime",
        Some("avi") => "video/x-msvideo",
        Some("webm") => "video/webm",
        Some("mkv") => "video/x-matroska",
        Some("mpeg") | Some("mpg") => "video/mpeg",
        _ => "video/mp4",
    }
}

/// Extractor backed by a Gemini `generateContent` call with the media inlined.
pub struct GeminiExtractor {
    client: GeminiClient,
    model: String,
}

impl GeminiExtractor {
    /// Create an extractor for `model`.
    pub fn new(client: GeminiClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Request body for `bytes` of media typed `mime`.
    pub fn build_payload(bytes: &[u8], mime: &str) -> Value {
        let data = base64::engine::general_purpose::STANDARD.encode(bytes);
        json!({
            "contents": [{
                "parts": [
                    {"inlineData": {"mimeType": mime, "data": data}},
                    {"text": METADATA_PROMPT}
                ]
            }]
        })
    }

    async fn try_extract(&self, media: &Path, display_name: &str) -> Result<AttributeRecord> {
        let bytes = tokio::fs::read(media).await?;
        info!("Extracting metadata for {} ({} bytes)", display_name, bytes.len());

        let payload = Self::build_payload(&bytes, mime_type(media));
        let body = self.client.call(&self.model, "generateContent", &payload).await?;
        let text = candidate_text(&body)
            .ok_or_else(|| ExtractError::MalformedResponse("no candidate text".to_string()))?;

        Ok(parse_model_response(text, display_name))
    }
}

#[async_trait]
impl MetadataExtractor for GeminiExtractor {
    async fn extract(&self, media: &Path, display_name: &str) -> AttributeRecord {
        match self.try_extract(media, display_name).await {
            Ok(record) => record,
            Err(e) => {
                warn!("Extraction failed for {}: {}", display_name, e);
                AttributeRecord::from_error(e.to_string())
            }
        }
    }
}
