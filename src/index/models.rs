//! Data models for the course index

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One embedded course record, as produced by the offline ingestion step.
///
/// Immutable after load. `time_slots` keeps the raw comma-joined string
/// form from ingestion; parsing into a typed slot set happens once, at the
/// filter boundary. Unknown fields are carried as pass-through metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseDocument {
    /// Stable identifier (course serial number)
    pub id: String,
    /// Free-text description; embedded at ingestion time and shown as context
    pub text: String,
    /// Comma-joined slot codes, e.g. "1_3,1_4"
    #[serde(default)]
    pub time_slots: String,
    /// Embedding vector computed by the ingestion pipeline
    pub embedding: Vec<f32>,
    /// Arbitrary pass-through metadata (title, instructor, ...)
    #[serde(flatten)]
    pub metadata: HashMap<String, serde_json::Value>,
}

/// A course paired with its similarity score for one query
///
/// Transient: produced by one index search, ordered by descending score,
/// discarded at the end of the request.
#[derive(Debug, Clone)]
pub struct SimilarityCandidate {
    pub document: CourseDocument,
    pub score: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_deserializes_with_metadata_passthrough() {
        let json = r#"{
            "id": "C-1042",
            "text": "Intro to machine learning",
            "time_slots": "1_3,1_4",
            "embedding": [0.1, 0.2, 0.3],
            "title": "ML 101",
            "credits": 3
        }"#;

        let doc: CourseDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.id, "C-1042");
        assert_eq!(doc.time_slots, "1_3,1_4");
        assert_eq!(doc.metadata.get("title").unwrap(), "ML 101");
        assert_eq!(doc.metadata.get("credits").unwrap(), 3);
    }

    #[test]
    fn test_missing_time_slots_defaults_to_empty() {
        let json = r#"{"id": "C-1", "text": "t", "embedding": [0.0]}"#;
        let doc: CourseDocument = serde_json::from_str(json).unwrap();
        assert!(doc.time_slots.is_empty());
    }
}
