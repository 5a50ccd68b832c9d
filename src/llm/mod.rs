//! Completion model client for the generation step
//!
//! One fully-assembled prompt per recommendation call, no multi-turn
//! state. Failures are terminal for the current call — no retry loop;
//! the caller decides on user-facing messaging and retry.

use crate::error::{AdvisorError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Text-completion collaborator invoked once per recommendation
#[async_trait]
pub trait CompletionModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Configuration for the chat-completion client
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub timeout: Duration,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            api_key: None,
            model: "gpt-4o".to_string(),
            temperature: 0.3,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Chat-completion client for OpenAI-compatible APIs
pub struct OpenAiChatModel {
    client: Client,
    config: CompletionConfig,
}

impl OpenAiChatModel {
    pub fn new(config: CompletionConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AdvisorError::Config(e.to_string()))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl CompletionModel for OpenAiChatModel {
    async fn complete(&self, prompt: &str) -> Result<String> {
        debug!("Invoking completion model ({} prompt chars)", prompt.len());

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: Some(self.config.temperature),
        };

        let mut req = self.client.post(&self.config.endpoint).json(&request);
        if let Some(ref api_key) = self.config.api_key {
            req = req.bearer_auth(api_key);
        }

        let response = req.send().await.map_err(|e| {
            if e.is_timeout() {
                AdvisorError::GenerationFailed(format!("completion request timed out: {}", e))
            } else {
                AdvisorError::GenerationFailed(format!("completion request failed: {}", e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AdvisorError::GenerationFailed(format!(
                "completion endpoint returned {}: {}",
                status, body
            )));
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|e| {
            AdvisorError::GenerationFailed(format!("invalid completion response: {}", e))
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| {
                AdvisorError::GenerationFailed("completion response carried no choices".to_string())
            })
    }
}

// OpenAI-compatible API types
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}
