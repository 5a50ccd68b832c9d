//! Recommendation orchestrator
//!
//! End-to-end pipeline for one request: ensure the index is initialized,
//! retrieve similarity candidates, drop those that do not fit the
//! student's availability, assemble a bounded context, invoke the
//! completion model once, and normalize its output.

pub mod context;
pub mod filter;

pub use context::assemble_context;
pub use filter::{filter_candidates, FilteredCandidate};

use crate::error::{AdvisorError, Result};
use crate::index::CourseIndex;
use crate::llm::CompletionModel;
use crate::markdown::normalize;
use crate::metrics::METRICS;
use crate::schedule::SlotSet;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Returned when no retrieved course fits the student's slots.
///
/// A normal, successful result — the model is guaranteed not to be
/// invoked in this case.
pub const NO_MATCH_MESSAGE: &str =
    "No courses match your available time slots. Try freeing up more slots or rephrasing your request.";

/// Instructional template filled with the student's request and the
/// assembled course context.
const PROMPT_TEMPLATE: &str = "\
You are a professional course advisor. Based on the course descriptions below, \
recommend the courses best suited to the student's request. Reply in standard \
Markdown with no extra indentation or blank lines around list items, because \
the reply will be rendered again.

Student's request:
{question}

Candidate courses:
{context}

Recommend up to 5 of these courses. For each, give the course name, meeting \
times, serial number, and a short reason.";

/// Tunables for one engine instance
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Candidates fetched from the index per query
    pub search_limit: usize,
    /// Courses kept in the assembled context
    pub max_context_docs: usize,
    /// Bound on the retrieval step (embed + rank)
    pub search_timeout: Duration,
    /// Bound on the completion call
    pub generation_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_limit: 15,
            max_context_docs: 5,
            search_timeout: Duration::from_secs(15),
            generation_timeout: Duration::from_secs(60),
        }
    }
}

fn build_prompt(question: &str, context: &str) -> String {
    PROMPT_TEMPLATE
        .replace("{question}", question)
        .replace("{context}", context)
}

/// Process-wide recommendation engine
///
/// Constructed once at startup and shared via `Arc`; all state is
/// read-only after index initialization, so concurrent requests need no
/// locking beyond the index's own init gate.
pub struct RecommendationEngine {
    index: Arc<CourseIndex>,
    model: Arc<dyn CompletionModel>,
    config: EngineConfig,
}

impl RecommendationEngine {
    pub fn new(
        index: Arc<CourseIndex>,
        model: Arc<dyn CompletionModel>,
        config: EngineConfig,
    ) -> Self {
        Self {
            index,
            model,
            config,
        }
    }

    /// Recommend courses for a free-text request constrained to the given
    /// availability.
    ///
    /// Errors are terminal for this call: `IndexUnavailable` for index
    /// load/query failures, `GenerationFailed` for model failures.
    /// Neither is retried here.
    pub async fn recommend(&self, query: &str, availability: &SlotSet) -> Result<String> {
        self.index.ensure_initialized().await?;

        let start = Instant::now();
        let candidates = tokio::time::timeout(
            self.config.search_timeout,
            self.index.search(query, self.config.search_limit),
        )
        .await
        .map_err(|_| {
            AdvisorError::IndexUnavailable(format!(
                "similarity search exceeded {:?}",
                self.config.search_timeout
            ))
        })??;
        METRICS
            .search_duration
            .observe(start.elapsed().as_secs_f64());

        let filtered = filter_candidates(candidates, availability);
        if filtered.is_empty() {
            // Hard short-circuit: zero model invocations without evidence.
            info!("No admissible courses for query, returning sentinel");
            METRICS.recommend_requests.with_label_values(&["no_match"]).inc();
            return Ok(NO_MATCH_MESSAGE.to_string());
        }

        let context = assemble_context(&filtered, self.config.max_context_docs);
        let prompt = build_prompt(query, &context);
        debug!(
            "Invoking completion with {} of {} admissible courses",
            filtered.len().min(self.config.max_context_docs),
            filtered.len()
        );

        let start = Instant::now();
        let raw = tokio::time::timeout(
            self.config.generation_timeout,
            self.model.complete(&prompt),
        )
        .await
        .map_err(|_| {
            AdvisorError::GenerationFailed(format!(
                "completion exceeded {:?}",
                self.config.generation_timeout
            ))
        })??;
        METRICS
            .generation_duration
            .observe(start.elapsed().as_secs_f64());
        METRICS.recommend_requests.with_label_values(&["ok"]).inc();

        Ok(normalize(&raw))
    }
}
