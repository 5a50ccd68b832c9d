//! Recommendation API handlers

use crate::engine::RecommendationEngine;
use crate::error::AdvisorError;
use crate::metrics::METRICS;
use crate::schedule::{SlotSet, TimeSlot};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AdvisorState {
    pub engine: Arc<RecommendationEngine>,
}

/// API error body
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Recommendation request
///
/// `slots` is the caller's availability for this request; saving slot
/// preferences and chat transcripts belongs to the upstream collaborator.
#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub query: String,
    #[serde(default)]
    pub slots: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub answer: String,
}

/// Recommend courses
///
/// POST /api/v1/recommend
pub async fn recommend(
    State(state): State<AdvisorState>,
    Json(request): Json<RecommendRequest>,
) -> Result<Json<RecommendResponse>, (StatusCode, Json<ApiError>)> {
    info!(
        "Recommendation request: {} chars, {} slots",
        request.query.len(),
        request.slots.len()
    );

    if request.query.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError::new("VALIDATION_ERROR", "Query cannot be empty")),
        ));
    }

    let availability: SlotSet = request
        .slots
        .iter()
        .map(|s| TimeSlot::new(s.clone()))
        .collect();

    match state.engine.recommend(&request.query, &availability).await {
        Ok(answer) => Ok(Json(RecommendResponse { answer })),
        Err(e) => {
            error!("Recommendation failed: {}", e);
            let status = match &e {
                AdvisorError::IndexUnavailable(_) => {
                    METRICS
                        .recommend_requests
                        .with_label_values(&["index_unavailable"])
                        .inc();
                    StatusCode::SERVICE_UNAVAILABLE
                }
                AdvisorError::GenerationFailed(_) => {
                    METRICS
                        .recommend_requests
                        .with_label_values(&["generation_failed"])
                        .inc();
                    StatusCode::BAD_GATEWAY
                }
                AdvisorError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            Err((status, Json(ApiError::new(e.code(), e.to_string()))))
        }
    }
}
