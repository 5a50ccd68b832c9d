//! Course advisor: constrained retrieval and recommendation engine
//!
//! Combines semantic similarity search over course descriptions with a
//! hard schedule constraint: a recommended course's meeting slots must fit
//! entirely within the student's declared availability. Admissible courses
//! are assembled into a bounded context for a single completion-model
//! call, and the generated Markdown is normalized before it is returned.

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod index;
pub mod llm;
pub mod markdown;
pub mod metrics;
pub mod provision;
pub mod schedule;

pub use engine::{EngineConfig, RecommendationEngine, NO_MATCH_MESSAGE};
pub use error::{AdvisorError, Result};
pub use index::{CourseDocument, CourseIndex, SimilarityCandidate};
pub use schedule::{SlotSet, TimeSlot};
