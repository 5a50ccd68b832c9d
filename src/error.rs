//! Error taxonomy for the recommendation engine

use thiserror::Error;

/// Engine errors surfaced to callers
///
/// Both variants are terminal for the current request; the engine never
/// retries internally. Malformed course metadata is not represented here:
/// it is absorbed at the filter boundary by parsing to an empty slot set.
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// The course index is missing, empty, or failed to load or query
    #[error("course index unavailable: {0}")]
    IndexUnavailable(String),

    /// The completion model call errored or timed out
    #[error("generation failed: {0}")]
    GenerationFailed(String),

    /// Invalid configuration detected at startup
    #[error("configuration error: {0}")]
    Config(String),
}

impl AdvisorError {
    /// Stable machine-readable code for API error bodies
    pub fn code(&self) -> &'static str {
        match self {
            AdvisorError::IndexUnavailable(_) => "INDEX_UNAVAILABLE",
            AdvisorError::GenerationFailed(_) => "GENERATION_FAILED",
            AdvisorError::Config(_) => "CONFIG_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, AdvisorError>;
