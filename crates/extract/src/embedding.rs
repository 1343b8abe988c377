//! Text embedding for semantic search.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::{ExtractError, Result};
use crate::gemini::GeminiClient;

/// Turns text into a vector.
#[async_trait]
pub trait EmbeddingService: Send + Sync {
    /// Embed a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Gemini `embedContent` client.
#[derive(Clone)]
pub struct GeminiEmbeddingClient {
    client: GeminiClient,
    model: String,
}

impl GeminiEmbeddingClient {
    /// Create a client for `model`, e.g. `gemini-embedding-001`.
    pub fn new(client: GeminiClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Request body for `text`.
    pub fn build_payload(&self, text: &str) -> Value {
        json!({
            "model": format!("models/{}", self.model),
            "content": {"parts": [{"text": text}]}
        })
    }
}

/// Embedding values from an `embedContent` response body.
pub fn parse_embedding(body: &Value) -> Result<Vec<f32>> {
    let values = body
        .pointer("/embedding/values")
        .and_then(Value::as_array)
        .ok_or_else(|| ExtractError::MalformedResponse("no embedding values".to_string()))?;

    values
        .iter()
        .map(|v| {
            v.as_f64()
                .map(|f| f as f32)
                .ok_or_else(|| ExtractError::MalformedResponse(format!("non-numeric value {}", v)))
        })
        .collect()
}

#[async_trait]
impl EmbeddingService for GeminiEmbeddingClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        debug!("Generating embedding for text ({} chars)", text.len());
        let body = self
            .client
            .call(&self.model, "embedContent", &self.build_payload(text))
            .await?;
        parse_embedding(&body)
    }
}
