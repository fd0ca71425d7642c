//! Sequential bulk upload of local media files.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{error, info, warn};

use crate::error::StorageResult;
use crate::store::{content_type_for, ObjectMetadata, ObjectStore};

/// Default extension picked up when no files are named.
pub const DEFAULT_VIDEO_EXTENSION: &str = "mp4";

/// Outcome of a single file in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UploadOutcome {
    Uploaded { key: String },
    Skipped { key: String },
    Failed { key: String, error: String },
}

impl UploadOutcome {
    pub fn key(&self) -> &str {
        match self {
            Self::Uploaded { key } | Self::Skipped { key } | Self::Failed { key, .. } => key,
        }
    }
}

/// Summary of a bulk upload.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub outcomes: Vec<UploadOutcome>,
}

impl BatchReport {
    pub fn uploaded(&self) -> usize {
        self.count(|o| matches!(o, UploadOutcome::Uploaded { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, UploadOutcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, UploadOutcome::Failed { .. }))
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    fn count(&self, pred: impl Fn(&UploadOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }
}

/// File names in `folder` ending in `.{extension}` (case-insensitive), sorted.
pub async fn discover_videos(folder: &Path, extension: &str) -> StorageResult<Vec<String>> {
    let mut entries = tokio::fs::read_dir(folder).await?;
    let mut names = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        let matches = Path::new(&name)
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(extension));
        if matches {
            names.push(name);
        }
    }

    names.sort();
    Ok(names)
}

/// Upload each named file from `folder`, keyed by its file name.
///
/// Runs one file at a time. A missing file or a failed upload is recorded and
/// the batch moves on.
pub async fn upload_batch(
    store: &dyn ObjectStore,
    folder: &Path,
    file_names: &[String],
) -> BatchReport {
    let mut report = BatchReport::default();

    for name in file_names {
        let path: PathBuf = folder.join(name);
        info!("Uploading {}...", name);

        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            warn!("File not found: {}, skipping", name);
            report.outcomes.push(UploadOutcome::Skipped { key: name.clone() });
            continue;
        }

        let metadata = ObjectMetadata::with_content_type(content_type_for(name));
        match store.put_file(&path, name, &metadata).await {
            Ok(()) => {
                info!(key = %name, "upload succeeded");
                report.outcomes.push(UploadOutcome::Uploaded { key: name.clone() });
            }
            Err(e) => {
                error!(key = %name, error = %e, "upload failed");
                report.outcomes.push(UploadOutcome::Failed {
                    key: name.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    report
}
