//! Plain-text reconciliation report.

use std::fmt::Write;

use crate::error::ReconcileResult;
use crate::reconcile::ManifestDiff;

const RULE: &str = "------------------------------";

/// Render the human-readable report for a diff.
pub fn render_report(diff: &ManifestDiff) -> ReconcileResult<String> {
    let drafts = diff
        .drafts
        .iter()
        .map(serde_json::to_string_pretty)
        .collect::<serde_json::Result<Vec<_>>>()?;

    let mut out = String::new();
    write_report(&mut out, diff, &drafts)?;
    Ok(out)
}

fn write_report<W: Write>(out: &mut W, diff: &ManifestDiff, drafts: &[String]) -> std::fmt::Result {
    writeln!(out, "{RULE}")?;
    writeln!(out, "VIDEO FOLDER CHECK REPORT")?;
    writeln!(out, "{RULE}")?;
    writeln!(out)?;

    writeln!(out, "SUMMARY")?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "- Manifest entries:     {}", diff.manifest_entries)?;
    writeln!(out, "- Video files:          {}", diff.video_files)?;
    writeln!(out, "- Thumbnails:           {}", diff.thumbnails)?;
    writeln!(out, "- New videos detected:  {}", diff.new_videos.len())?;
    writeln!(out, "- Missing video files:  {}", diff.missing_videos.len())?;
    writeln!(out, "- Missing thumbnails:   {}", diff.missing_thumbnails.len())?;
    writeln!(out)?;

    if drafts.is_empty() {
        writeln!(out, "No new videos found.")?;
        writeln!(out)?;
    } else {
        writeln!(out, "NEW VIDEOS FOUND ({}):", drafts.len())?;
        writeln!(out)?;
        for draft in drafts {
            writeln!(out, "{},", draft)?;
            writeln!(out)?;
        }
    }

    if !diff.missing_videos.is_empty() {
        writeln!(out, "Missing video files:")?;
        for src in &diff.missing_videos {
            writeln!(out, " - {}", src)?;
        }
        writeln!(out)?;
    }

    if !diff.missing_thumbnails.is_empty() {
        writeln!(out, "Missing thumbnails:")?;
        for thumb in &diff.missing_thumbnails {
            writeln!(out, " - {}", thumb)?;
        }
        writeln!(out)?;
    }

    writeln!(out, "Check complete.")?;
    writeln!(out, "{RULE}")
}
