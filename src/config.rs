//! Service configuration
//!
//! Loaded from an optional TOML file with `ADVISOR_*` environment
//! overrides (e.g. `ADVISOR_SERVER__PORT=9000`). API keys are named by
//! environment variable and resolved at client construction, never stored
//! in the file.

use crate::error::{AdvisorError, Result};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub engine: EngineSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndexConfig {
    /// Local directory the provisioning step populates
    #[serde(default = "default_index_dir")]
    pub dir: String,
    /// Remote course-file URL; when unset, the directory must already be
    /// populated before startup
    #[serde(default)]
    pub archive_url: Option<String>,
}

fn default_index_dir() -> String {
    "./persist/course_index".to_string()
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            dir: default_index_dir(),
            archive_url: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingConfig {
    #[serde(default = "default_embedding_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_embedding_model")]
    pub model: String,
    #[serde(default = "default_embedding_timeout")]
    pub timeout_secs: u64,
}

fn default_embedding_endpoint() -> String {
    "https://api.openai.com/v1/embeddings".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_embedding_model() -> String {
    "text-embedding-3-small".to_string()
}

fn default_embedding_timeout() -> u64 {
    10
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            endpoint: default_embedding_endpoint(),
            api_key_env: default_api_key_env(),
            model: default_embedding_model(),
            timeout_secs: default_embedding_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_llm_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_llm_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

fn default_llm_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_llm_model() -> String {
    "gpt-4o".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_llm_timeout() -> u64 {
    60
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: default_llm_endpoint(),
            api_key_env: default_api_key_env(),
            model: default_llm_model(),
            temperature: default_temperature(),
            timeout_secs: default_llm_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngineSettings {
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
    #[serde(default = "default_max_context_docs")]
    pub max_context_docs: usize,
    #[serde(default = "default_search_timeout")]
    pub search_timeout_secs: u64,
    #[serde(default = "default_generation_timeout")]
    pub generation_timeout_secs: u64,
}

fn default_search_limit() -> usize {
    15
}

fn default_max_context_docs() -> usize {
    5
}

fn default_search_timeout() -> u64 {
    15
}

fn default_generation_timeout() -> u64 {
    60
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            search_limit: default_search_limit(),
            max_context_docs: default_max_context_docs(),
            search_timeout_secs: default_search_timeout(),
            generation_timeout_secs: default_generation_timeout(),
        }
    }
}

impl AppConfig {
    /// Load from `config_path` (optional file) layered with `ADVISOR_*`
    /// environment overrides.
    pub fn load(config_path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("ADVISOR").separator("__"))
            .build()
            .map_err(|e| AdvisorError::Config(e.to_string()))?;

        settings
            .try_deserialize()
            .map_err(|e| AdvisorError::Config(e.to_string()))
    }

    pub fn embedding_timeout(&self) -> Duration {
        Duration::from_secs(self.embedding.timeout_secs)
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm.timeout_secs)
    }

    /// Resolve the configured API key variable, if set in the environment
    pub fn api_key(env_name: &str) -> Option<String> {
        std::env::var(env_name).ok()
    }
}
