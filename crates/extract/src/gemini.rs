//! Minimal HTTP client for the Gemini REST API.

use reqwest::{Client, ClientBuilder};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use vidqc_core::VidqcConfig;

use crate::error::{ExtractError, Result};
use crate::response::api_error_message;

/// Shared connection settings for generate and embed calls.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_base: String,
    api_key: String,
}

impl GeminiClient {
    /// Create a client.
    pub fn new(api_base: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: ClientBuilder::new()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Create a client from configuration. Fails when no API key is set.
    pub fn from_config(config: &VidqcConfig) -> Result<Self> {
        let key = config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ExtractError::MissingApiKey)?;
        Ok(Self::new(
            config.api_base.clone(),
            key,
            Duration::from_secs(config.timeout_secs),
        ))
    }

    /// Endpoint URL for `model` and `method`, e.g. `generateContent`.
    pub fn endpoint(&self, model: &str, method: &str) -> String {
        format!("{}/models/{}:{}", self.api_base, model, method)
    }

    /// POST a JSON payload and return the JSON body of a successful response.
    pub async fn call(&self, model: &str, method: &str, payload: &Value) -> Result<Value> {
        let url = self.endpoint(model, method);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ExtractError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
