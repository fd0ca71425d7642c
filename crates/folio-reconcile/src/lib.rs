//! Manifest reconciliation.
//!
//! Compares the video manifest with the media folder, drafts entries for new
//! videos and writes a report plus a merged candidate manifest for review. The
//! manifest itself is never modified.

pub mod entry;
pub mod error;
pub mod reconcile;
pub mod report;
pub mod run;
pub mod scan;

pub use entry::{backfill_ids, parse_entries, ManifestEntry};
pub use error::{ReconcileError, ReconcileResult};
pub use reconcile::{diff, draft_record, merge, next_id, DraftDefaults, ManifestDiff, DRAFT_CATEGORY};
pub use report::render_report;
pub use run::{run, ReconcileOptions, RunOutcome};
pub use scan::{is_hidden, FolderScan, DEFAULT_VIDEO_EXTENSIONS, IMAGE_EXTENSIONS};
