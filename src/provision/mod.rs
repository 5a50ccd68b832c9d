//! Index provisioning: fetch the serialized course store to the local
//! index directory before first use
//!
//! The course file is produced by an offline ingestion pipeline and
//! published to object storage. This step only places it on disk; loading
//! and validation belong to the index itself.

use crate::config::IndexConfig;
use crate::error::{AdvisorError, Result};
use crate::index::FileSource;
use std::path::Path;
use tracing::info;

/// Ensure the index directory holds the course file.
///
/// Already-present data is left untouched (startup is idempotent). When
/// missing, the file is fetched from the configured URL and written via a
/// temp path + rename so index initialization can never observe a partial
/// download. Any failure surfaces `IndexUnavailable`.
pub async fn ensure_index_data(config: &IndexConfig) -> Result<()> {
    let dir = Path::new(&config.dir);
    let target = dir.join(FileSource::COURSE_FILE);

    if target.exists() {
        info!("Course store already provisioned at {}", target.display());
        return Ok(());
    }

    let url = config.archive_url.as_deref().ok_or_else(|| {
        AdvisorError::IndexUnavailable(format!(
            "course store missing at {} and no archive URL configured",
            target.display()
        ))
    })?;

    info!("Downloading course store from {}", url);

    let response = reqwest::get(url).await.map_err(|e| {
        AdvisorError::IndexUnavailable(format!("course store download failed: {}", e))
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(AdvisorError::IndexUnavailable(format!(
            "course store download returned {}",
            status
        )));
    }

    let bytes = response.bytes().await.map_err(|e| {
        AdvisorError::IndexUnavailable(format!("course store download failed: {}", e))
    })?;

    tokio::fs::create_dir_all(dir).await.map_err(|e| {
        AdvisorError::IndexUnavailable(format!(
            "failed to create index directory {}: {}",
            dir.display(),
            e
        ))
    })?;

    let tmp = dir.join(format!("{}.partial", FileSource::COURSE_FILE));
    tokio::fs::write(&tmp, &bytes).await.map_err(|e| {
        AdvisorError::IndexUnavailable(format!("failed to write course store: {}", e))
    })?;
    tokio::fs::rename(&tmp, &target).await.map_err(|e| {
        AdvisorError::IndexUnavailable(format!("failed to finalize course store: {}", e))
    })?;

    info!("Course store provisioned: {} bytes", bytes.len());
    Ok(())
}
