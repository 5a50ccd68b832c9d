//! Backing store access for the course index

use super::models::CourseDocument;
use crate::error::{AdvisorError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::info;

/// Opens the backing store and yields the full course document set.
///
/// The production source reads the JSON file left behind by the index
/// provisioning step. Tests substitute counting doubles to assert the
/// single-load guarantee.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn load(&self) -> Result<Vec<CourseDocument>>;
}

/// Reads course documents from `<index_dir>/courses.json`
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Conventional file name inside the provisioned index directory
    pub const COURSE_FILE: &'static str = "courses.json";

    pub fn new(index_dir: impl AsRef<Path>) -> Self {
        Self {
            path: index_dir.as_ref().join(Self::COURSE_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DocumentSource for FileSource {
    async fn load(&self) -> Result<Vec<CourseDocument>> {
        let data = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            AdvisorError::IndexUnavailable(format!(
                "failed to read course store {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let documents: Vec<CourseDocument> = serde_json::from_str(&data).map_err(|e| {
            AdvisorError::IndexUnavailable(format!(
                "failed to parse course store {}: {}",
                self.path.display(),
                e
            ))
        })?;

        info!("Loaded {} course documents from {}", documents.len(), self.path.display());
        Ok(documents)
    }
}
