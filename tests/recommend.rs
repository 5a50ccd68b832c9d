//! End-to-end tests for the recommendation pipeline
//!
//! Exercises the engine through its public surface with counting test
//! doubles for the document source and the completion model.

use async_trait::async_trait;
use course_advisor::engine::{EngineConfig, RecommendationEngine, NO_MATCH_MESSAGE};
use course_advisor::error::Result;
use course_advisor::index::{
    CourseDocument, CourseIndex, DocumentSource, Embedder, FileSource,
};
use course_advisor::llm::CompletionModel;
use course_advisor::schedule::SlotSet;
use course_advisor::AdvisorError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

struct StaticSource(Vec<CourseDocument>);

#[async_trait]
impl DocumentSource for StaticSource {
    async fn load(&self) -> Result<Vec<CourseDocument>> {
        Ok(self.0.clone())
    }
}

struct CountingSource {
    documents: Vec<CourseDocument>,
    loads: AtomicUsize,
}

#[async_trait]
impl DocumentSource for CountingSource {
    async fn load(&self) -> Result<Vec<CourseDocument>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(self.documents.clone())
    }
}

struct FixedEmbedder(Vec<f32>);

#[async_trait]
impl Embedder for FixedEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Ok(self.0.clone())
    }
}

struct CountingModel {
    calls: AtomicUsize,
    reply: String,
}

impl CountingModel {
    fn new(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            reply: reply.to_string(),
        })
    }
}

#[async_trait]
impl CompletionModel for CountingModel {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }
}

struct HangingModel;

#[async_trait]
impl CompletionModel for HangingModel {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        tokio::time::sleep(Duration::from_secs(600)).await;
        unreachable!("model call should have been cut off by the timeout")
    }
}

fn doc(id: &str, time_slots: &str, embedding: Vec<f32>) -> CourseDocument {
    CourseDocument {
        id: id.to_string(),
        text: format!("Description of course {}", id),
        time_slots: time_slots.to_string(),
        embedding,
        metadata: Default::default(),
    }
}

fn engine(
    docs: Vec<CourseDocument>,
    model: Arc<dyn CompletionModel>,
    config: EngineConfig,
) -> RecommendationEngine {
    let index = Arc::new(CourseIndex::new(
        Arc::new(StaticSource(docs)),
        Arc::new(FixedEmbedder(vec![1.0, 0.0])),
    ));
    RecommendationEngine::new(index, model, config)
}

#[tokio::test]
async fn recommends_only_courses_that_fit_the_schedule() {
    // "machine learning" example: availability {1_3, 1_4}; a course
    // meeting {1_3, 1_4, 3_3} must be excluded, one meeting {1_3} kept.
    let model = CountingModel::new("Take the fitting course.");
    let engine = engine(
        vec![
            doc("superset", "1_3,1_4,3_3", vec![1.0, 0.0]),
            doc("subset", "1_3", vec![0.9, 0.1]),
        ],
        model.clone(),
        EngineConfig::default(),
    );

    let availability: SlotSet = ["1_3", "1_4"].into_iter().collect();
    let answer = engine
        .recommend("machine learning", &availability)
        .await
        .unwrap();

    assert_eq!(answer, "Take the fitting course.");
    assert_eq!(model.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn empty_availability_admits_only_unscheduled_courses() {
    let model = CountingModel::new("reply");
    let engine = engine(
        vec![
            doc("unscheduled", "", vec![1.0, 0.0]),
            doc("scheduled", "2_2", vec![1.0, 0.0]),
        ],
        model.clone(),
        EngineConfig::default(),
    );

    let answer = engine.recommend("anything", &SlotSet::new()).await.unwrap();
    assert_eq!(answer, "reply");
    assert_eq!(model.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn sentinel_and_zero_model_calls_when_nothing_fits() {
    let model = CountingModel::new("should never be produced");
    let engine = engine(
        vec![doc("scheduled", "2_2", vec![1.0, 0.0])],
        model.clone(),
        EngineConfig::default(),
    );

    let answer = engine.recommend("anything", &SlotSet::new()).await.unwrap();
    assert_eq!(answer, NO_MATCH_MESSAGE);
    assert_eq!(model.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn sentinel_when_the_index_is_searched_but_returns_nothing_admissible() {
    // All candidates retrieved, all dropped by the filter.
    let model = CountingModel::new("unused");
    let engine = engine(
        vec![
            doc("a", "5_5", vec![1.0, 0.0]),
            doc("b", "6_6", vec![0.8, 0.2]),
        ],
        model.clone(),
        EngineConfig::default(),
    );

    let availability: SlotSet = ["1_1"].into_iter().collect();
    let answer = engine.recommend("q", &availability).await.unwrap();
    assert_eq!(answer, NO_MATCH_MESSAGE);
    assert_eq!(model.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn concurrent_first_requests_load_the_store_once() {
    let source = Arc::new(CountingSource {
        documents: vec![doc("a", "", vec![1.0, 0.0])],
        loads: AtomicUsize::new(0),
    });
    let index = Arc::new(CourseIndex::new(
        source.clone(),
        Arc::new(FixedEmbedder(vec![1.0, 0.0])),
    ));
    let engine = Arc::new(RecommendationEngine::new(
        index,
        CountingModel::new("reply"),
        EngineConfig::default(),
    ));

    let tasks: Vec<_> = (0..12)
        .map(|_| {
            let engine = engine.clone();
            tokio::spawn(async move { engine.recommend("q", &SlotSet::new()).await })
        })
        .collect();

    for task in tasks {
        assert_eq!(task.await.unwrap().unwrap(), "reply");
    }

    assert_eq!(source.loads.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn hanging_model_fails_with_generation_timeout() {
    let config = EngineConfig {
        generation_timeout: Duration::from_millis(100),
        ..EngineConfig::default()
    };
    let engine = engine(
        vec![doc("a", "", vec![1.0, 0.0])],
        Arc::new(HangingModel),
        config,
    );

    let started = std::time::Instant::now();
    let err = engine.recommend("q", &SlotSet::new()).await.unwrap_err();

    assert!(matches!(err, AdvisorError::GenerationFailed(_)));
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn file_backed_store_drives_the_full_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let body = r#"[
        {"id": "C-1", "text": "Intro to ML", "time_slots": "1_3", "embedding": [1.0, 0.0], "title": "ML 101"},
        {"id": "C-2", "text": "Politics", "time_slots": "2_2,2_3", "embedding": [0.0, 1.0]}
    ]"#;
    std::fs::write(dir.path().join(FileSource::COURSE_FILE), body).unwrap();

    let model = CountingModel::new("- ML 101 (C-1)\n\n\nfits Monday.");
    let index = Arc::new(CourseIndex::new(
        Arc::new(FileSource::new(dir.path())),
        Arc::new(FixedEmbedder(vec![1.0, 0.0])),
    ));
    let engine = RecommendationEngine::new(index, model.clone(), EngineConfig::default());

    let availability: SlotSet = ["1_3", "1_4"].into_iter().collect();
    let answer = engine.recommend("machine learning", &availability).await.unwrap();

    // C-2 does not fit; C-1 does, and the reply comes back normalized.
    assert_eq!(answer, "- ML 101 (C-1)\nfits Monday.");
    assert_eq!(model.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn missing_store_surfaces_index_unavailable() {
    let index = Arc::new(CourseIndex::new(
        Arc::new(FileSource::new("/nonexistent/dir")),
        Arc::new(FixedEmbedder(vec![1.0])),
    ));
    let model = CountingModel::new("unused");
    let engine = RecommendationEngine::new(index, model.clone(), EngineConfig::default());

    let err = engine.recommend("q", &SlotSet::new()).await.unwrap_err();
    assert!(matches!(err, AdvisorError::IndexUnavailable(_)));
    assert_eq!(model.calls.load(Ordering::SeqCst), 0);
}
