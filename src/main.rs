//! Service entrypoint

use anyhow::Context;
use course_advisor::api::{build_router, AdvisorState};
use course_advisor::config::AppConfig;
use course_advisor::engine::{EngineConfig, RecommendationEngine};
use course_advisor::index::{
    CourseIndex, EmbedderConfig, FileSource, OpenAiEmbedder,
};
use course_advisor::llm::{CompletionConfig, OpenAiChatModel};
use course_advisor::provision;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "course_advisor=info,tower_http=info".into()),
        )
        .init();

    let config = AppConfig::load("advisor").context("failed to load configuration")?;
    info!("Configuration loaded: index dir {}", config.index.dir);

    // Fetch the course store before accepting traffic; a failure here is
    // fatal rather than a per-request surprise.
    provision::ensure_index_data(&config.index)
        .await
        .context("index provisioning failed")?;

    let embedder = OpenAiEmbedder::new(EmbedderConfig {
        endpoint: config.embedding.endpoint.clone(),
        api_key: AppConfig::api_key(&config.embedding.api_key_env),
        model: config.embedding.model.clone(),
        timeout: config.embedding_timeout(),
    })?;

    let model = OpenAiChatModel::new(CompletionConfig {
        endpoint: config.llm.endpoint.clone(),
        api_key: AppConfig::api_key(&config.llm.api_key_env),
        model: config.llm.model.clone(),
        temperature: config.llm.temperature,
        timeout: config.llm_timeout(),
    })?;

    let index = Arc::new(CourseIndex::new(
        Arc::new(FileSource::new(&config.index.dir)),
        Arc::new(embedder),
    ));

    let engine = Arc::new(RecommendationEngine::new(
        index,
        Arc::new(model),
        EngineConfig {
            search_limit: config.engine.search_limit,
            max_context_docs: config.engine.max_context_docs,
            search_timeout: Duration::from_secs(config.engine.search_timeout_secs),
            generation_timeout: Duration::from_secs(config.engine.generation_timeout_secs),
        },
    ));

    let router = build_router(AdvisorState { engine }).layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, router).await.context("server error")?;

    Ok(())
}
