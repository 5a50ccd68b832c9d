//! Router assembly

use super::handlers::{self, AdvisorState};
use crate::metrics::METRICS;
use axum::{
    routing::{get, post},
    Router,
};

/// Build the service router
pub fn build_router(state: AdvisorState) -> Router {
    Router::new()
        .route("/api/v1/recommend", post(handlers::recommend))
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn metrics() -> String {
    METRICS.export()
}
