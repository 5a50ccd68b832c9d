//! Course index: lazily-initialized vector store over embedded course
//! documents with cosine-similarity search
//!
//! The document set is produced by an offline ingestion pipeline and
//! provisioned to a local directory before the first request; the index
//! only ever reads it. Initialization runs at most once process-wide,
//! gated by a `OnceCell` rather than a bare null check, so concurrent
//! first requests cannot trigger duplicate store loads.

pub mod embeddings;
pub mod models;
pub mod source;

pub use embeddings::{Embedder, EmbedderConfig, OpenAiEmbedder};
pub use models::{CourseDocument, SimilarityCandidate};
pub use source::{DocumentSource, FileSource};

use crate::error::{AdvisorError, Result};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// In-memory store of embedded course documents
struct CourseStore {
    documents: Vec<CourseDocument>,
}

impl CourseStore {
    /// Rank all documents by cosine similarity to the query vector.
    ///
    /// Ties break by document id so a given store state always yields the
    /// same ordering.
    fn search(&self, query_vector: &[f32], limit: usize) -> Vec<SimilarityCandidate> {
        let mut scored: Vec<SimilarityCandidate> = self
            .documents
            .iter()
            .map(|doc| SimilarityCandidate {
                document: doc.clone(),
                score: cosine_similarity(query_vector, &doc.embedding),
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.document.id.cmp(&b.document.id))
        });
        scored.truncate(limit);
        scored
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Process-wide course index
///
/// Shared across request handlers via `Arc`; read-only after
/// initialization, so concurrent searches need no synchronization.
pub struct CourseIndex {
    source: Arc<dyn DocumentSource>,
    embedder: Arc<dyn Embedder>,
    store: OnceCell<CourseStore>,
}

impl CourseIndex {
    pub fn new(source: Arc<dyn DocumentSource>, embedder: Arc<dyn Embedder>) -> Self {
        Self {
            source,
            embedder,
            store: OnceCell::new(),
        }
    }

    /// Ensure the backing store is loaded. Idempotent: after the first
    /// successful load this returns immediately; concurrent first calls
    /// share a single underlying load. A failed load leaves the cell
    /// empty, so a later request retries (retry policy itself stays with
    /// the caller).
    pub async fn ensure_initialized(&self) -> Result<()> {
        self.store
            .get_or_try_init(|| async {
                info!("Initializing course index");
                let documents = self.source.load().await?;
                if documents.is_empty() {
                    return Err(AdvisorError::IndexUnavailable(
                        "course store is empty after initialization".to_string(),
                    ));
                }
                info!("Course index ready: {} documents", documents.len());
                Ok(CourseStore { documents })
            })
            .await?;
        Ok(())
    }

    /// Top-`limit` documents by descending similarity to `query`.
    ///
    /// Requires a prior successful `ensure_initialized`.
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<SimilarityCandidate>> {
        let store = self.store.get().ok_or_else(|| {
            AdvisorError::IndexUnavailable("course index is not initialized".to_string())
        })?;

        let query_vector = self.embedder.embed(query).await?;
        let candidates = store.search(&query_vector, limit);
        debug!("Similarity search returned {} candidates", candidates.len());
        Ok(candidates)
    }
}
