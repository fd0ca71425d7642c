//! End-to-end reconciliation run: read, diff, write.

use std::path::{Path, PathBuf};

use chrono::Datelike;
use tracing::{info, warn};

use crate::entry::{backfill_ids, parse_entries, ManifestEntry};
use crate::error::{ReconcileError, ReconcileResult};
use crate::reconcile::{diff, merge, DraftDefaults, ManifestDiff, DEFAULT_PROGRAM};
use crate::report::render_report;
use crate::scan::{list_file_names, FolderScan, DEFAULT_VIDEO_EXTENSIONS};

/// Inputs and outputs of a run.
#[derive(Debug, Clone)]
pub struct ReconcileOptions {
    pub videos_dir: PathBuf,
    pub manifest: PathBuf,
    pub report: PathBuf,
    pub merged: PathBuf,
    pub video_extensions: Vec<String>,
    pub default_program: String,
    /// Year stamped on drafts
    pub year: i32,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            videos_dir: PathBuf::from("./public/videos"),
            manifest: PathBuf::from("./src/data/videos.json"),
            report: PathBuf::from("./update-report.txt"),
            merged: PathBuf::from("./videos-merged.json"),
            video_extensions: DEFAULT_VIDEO_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            default_program: DEFAULT_PROGRAM.to_string(),
            year: chrono::Local::now().year(),
        }
    }
}

/// What a run produced.
#[derive(Debug)]
pub struct RunOutcome {
    pub diff: ManifestDiff,
    pub merged: Vec<ManifestEntry>,
    /// Write failures, one per artifact that could not be written
    pub write_errors: Vec<ReconcileError>,
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        self.write_errors.is_empty()
    }
}

/// Run reconciliation.
///
/// Fatal errors (unreadable folder, merged path pointing at the manifest)
/// return before anything is written. Write failures are collected in the
/// outcome so the other artifact is still produced.
pub async fn run(options: &ReconcileOptions) -> ReconcileResult<RunOutcome> {
    if same_path(&options.manifest, &options.merged).await {
        return Err(ReconcileError::OutputIsManifest(options.merged.clone()));
    }

    let (manifest_raw, folder) = tokio::join!(
        tokio::fs::read_to_string(&options.manifest),
        list_file_names(&options.videos_dir),
    );
    let folder = folder?;

    let mut entries = match manifest_raw {
        Ok(raw) => parse_entries(&raw).unwrap_or_else(|e| {
            warn!("Could not parse {}: {}, starting fresh", options.manifest.display(), e);
            Vec::new()
        }),
        Err(e) => {
            warn!("Could not read {}: {}, starting fresh", options.manifest.display(), e);
            Vec::new()
        }
    };

    let filled = backfill_ids(&mut entries);
    if filled > 0 {
        warn!("Backfilled {} missing ids by position", filled);
    }

    let scan = FolderScan::from_file_names(&folder, &options.video_extensions);
    let defaults = DraftDefaults {
        year: options.year,
        program: options.default_program.clone(),
    };
    let diff = diff(&entries, &scan, &defaults)?;
    let merged = merge(&entries, &diff.drafts);

    let report = render_report(&diff)?;
    let merged_json = serde_json::to_string_pretty(&merged)?;

    let (report_res, merged_res) = tokio::join!(
        write_artifact(&options.report, report),
        write_artifact(&options.merged, merged_json),
    );

    let mut write_errors = Vec::new();
    match report_res {
        Ok(()) => info!("Report saved to {}", options.report.display()),
        Err(e) => write_errors.push(e),
    }
    match merged_res {
        Ok(()) => info!("Merged manifest created at {}", options.merged.display()),
        Err(e) => write_errors.push(e),
    }

    Ok(RunOutcome {
        diff,
        merged,
        write_errors,
    })
}

async fn write_artifact(path: &Path, contents: String) -> ReconcileResult<()> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|source| ReconcileError::Write {
            path: path.to_path_buf(),
            source,
        })
}

async fn same_path(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (tokio::fs::canonicalize(a).await, tokio::fs::canonicalize(b).await) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
