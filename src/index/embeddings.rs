//! Query embedding via an OpenAI-compatible embeddings endpoint

use crate::error::{AdvisorError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Embeds one query string into the same vector space as the ingested
/// course documents.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Configuration for the embeddings client
#[derive(Debug, Clone)]
pub struct EmbedderConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub model: String,
    pub timeout: Duration,
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/embeddings".to_string(),
            api_key: None,
            model: "text-embedding-3-small".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Embeddings client for OpenAI-compatible APIs
pub struct OpenAiEmbedder {
    client: Client,
    config: EmbedderConfig,
}

impl OpenAiEmbedder {
    pub fn new(config: EmbedderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AdvisorError::Config(e.to_string()))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        debug!("Embedding query ({} chars)", text.len());

        let request = EmbeddingRequest {
            model: self.config.model.clone(),
            input: text.to_string(),
        };

        let mut req = self.client.post(&self.config.endpoint).json(&request);
        if let Some(ref api_key) = self.config.api_key {
            req = req.bearer_auth(api_key);
        }

        // Embedding is part of the index query path, so any failure here
        // surfaces as an index error rather than a generation error.
        let response = req.send().await.map_err(|e| {
            if e.is_timeout() {
                AdvisorError::IndexUnavailable(format!("embedding request timed out: {}", e))
            } else {
                AdvisorError::IndexUnavailable(format!("embedding request failed: {}", e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AdvisorError::IndexUnavailable(format!(
                "embedding endpoint returned {}: {}",
                status, body
            )));
        }

        let parsed: EmbeddingResponse = response.json().await.map_err(|e| {
            AdvisorError::IndexUnavailable(format!("invalid embedding response: {}", e))
        })?;

        parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| {
                AdvisorError::IndexUnavailable("embedding response carried no vectors".to_string())
            })
    }
}

// OpenAI-compatible API types
#[derive(Debug, Serialize)]
struct EmbeddingRequest {
    model: String,
    input: String,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}
