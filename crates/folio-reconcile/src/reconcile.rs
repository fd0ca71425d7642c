//! Manifest vs. folder diff, draft records and the merged candidate.

use std::collections::HashSet;

use folio_models::VideoRecord;

use crate::entry::{file_base, file_name, ManifestEntry};
use crate::scan::FolderScan;

/// Placeholder category for drafted records.
pub const DRAFT_CATEGORY: &str = "TBD";
pub const DEFAULT_PROGRAM: &str = "Adobe Premiere Pro";

/// Values stamped onto drafted records.
#[derive(Debug, Clone)]
pub struct DraftDefaults {
    pub year: i32,
    pub program: String,
}

impl DraftDefaults {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            program: DEFAULT_PROGRAM.to_string(),
        }
    }
}

/// Differences between the manifest and the media folder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManifestDiff {
    pub manifest_entries: usize,
    pub video_files: usize,
    pub thumbnails: usize,
    /// Video file names on disk with no manifest entry
    pub new_videos: Vec<String>,
    /// Stored `src` paths whose file is not on disk
    pub missing_videos: Vec<String>,
    /// Stored `thumbnail` paths whose image is not on disk
    pub missing_thumbnails: Vec<String>,
    /// One draft per new video
    pub drafts: Vec<ManifestEntry>,
}

impl ManifestDiff {
    pub fn is_clean(&self) -> bool {
        self.new_videos.is_empty()
            && self.missing_videos.is_empty()
            && self.missing_thumbnails.is_empty()
    }
}

/// Compare manifest entries (ids already backfilled) with a folder scan.
pub fn diff(
    entries: &[ManifestEntry],
    scan: &FolderScan,
    defaults: &DraftDefaults,
) -> serde_json::Result<ManifestDiff> {
    let known_sources: HashSet<&str> = entries.iter().map(|e| file_base(e.src())).collect();

    let new_videos: Vec<String> = scan
        .videos
        .iter()
        .filter(|f| !known_sources.contains(file_base(f)))
        .cloned()
        .collect();

    let missing_videos = entries
        .iter()
        .filter(|e| !scan.has_video(file_name(e.src())))
        .map(|e| e.src().to_string())
        .collect();

    let missing_thumbnails = entries
        .iter()
        .filter(|e| !scan.has_image(file_base(e.thumbnail())))
        .map(|e| e.thumbnail().to_string())
        .collect();

    let first_id = next_id(entries);
    let drafts = new_videos
        .iter()
        .enumerate()
        .map(|(i, file)| ManifestEntry::from_record(&draft_record(first_id + i as u64, file, defaults)))
        .collect::<serde_json::Result<Vec<_>>>()?;

    Ok(ManifestDiff {
        manifest_entries: entries.len(),
        video_files: scan.videos.len(),
        thumbnails: scan.image_bases.len(),
        new_videos,
        missing_videos,
        missing_thumbnails,
        drafts,
    })
}

/// First id handed to a draft.
///
/// Continues after the manifest length, or after the highest numeric id when
/// ids have gaps, so drafts never collide with existing entries.
pub fn next_id(entries: &[ManifestEntry]) -> u64 {
    let highest = entries.iter().filter_map(ManifestEntry::numeric_id).max().unwrap_or(0);
    (entries.len() as u64).max(highest) + 1
}

/// Placeholder record for a video file with no manifest entry.
pub fn draft_record(id: u64, file: &str, defaults: &DraftDefaults) -> VideoRecord {
    let base = file_base(file);
    let mut record = VideoRecord::new(id, base, defaults.year, defaults.program.clone(), DRAFT_CATEGORY)
        .with_assets(format!("/videos/{}.png", base), format!("/videos/{}", file));
    record.description = Some(String::new());
    record.contributors = Some(String::new());
    record.music = Some(String::new());
    record.contributor_link = Some(String::new());
    record
}

/// Original entries followed by drafts, stable-sorted by numeric id.
///
/// Entries whose id is not a number keep their relative order after the
/// numbered ones.
pub fn merge(entries: &[ManifestEntry], drafts: &[ManifestEntry]) -> Vec<ManifestEntry> {
    let mut merged: Vec<ManifestEntry> = entries.iter().chain(drafts).cloned().collect();
    merged.sort_by_key(|e| match e.numeric_id() {
        Some(n) => (0, n),
        None => (1, 0),
    });
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::parse_entries;

    fn defaults() -> DraftDefaults {
        DraftDefaults::new(2025)
    }

    #[test]
    fn test_next_id_uses_length_or_highest() {
        let dense = parse_entries(r#"[{"id":"1"},{"id":"2"}]"#).unwrap();
        assert_eq!(next_id(&dense), 3);

        let gappy = parse_entries(r#"[{"id":"1"},{"id":"9"}]"#).unwrap();
        assert_eq!(next_id(&gappy), 10);

        let named = parse_entries(r#"[{"id":"intro"},{"id":"outro"}]"#).unwrap();
        assert_eq!(next_id(&named), 3);

        assert_eq!(next_id(&[]), 1);
    }

    #[test]
    fn test_draft_record_shape() {
        let record = draft_record(4, "sunset.mp4", &defaults());
        assert_eq!(record.id.as_str(), "4");
        assert_eq!(record.title, "sunset");
        assert_eq!(record.year, 2025);
        assert_eq!(record.program, DEFAULT_PROGRAM);
        assert_eq!(record.category, "TBD");
        assert_eq!(record.thumbnail, "/videos/sunset.png");
        assert_eq!(record.src, "/videos/sunset.mp4");
        assert_eq!(record.description.as_deref(), Some(""));
    }

    #[test]
    fn test_new_and_missing() {
        let entries = parse_entries(
            r#"[
                {"id":"1","src":"/videos/a.mp4","thumbnail":"/videos/a.png"},
                {"id":"2","src":"/videos/c.mp4","thumbnail":"/videos/c.jpg"}
            ]"#,
        )
        .unwrap();
        let scan = FolderScan::from_file_names(["a.mp4", "a.png", "b.mp4"], &["mp4".to_string()]);

        let diff = diff(&entries, &scan, &defaults()).unwrap();
        assert_eq!(diff.new_videos, vec!["b.mp4"]);
        assert_eq!(diff.missing_videos, vec!["/videos/c.mp4"]);
        assert_eq!(diff.missing_thumbnails, vec!["/videos/c.jpg"]);
        assert_eq!(diff.drafts.len(), 1);
        assert_eq!(diff.drafts[0].id.as_deref(), Some("3"));
        assert!(!diff.is_clean());
    }

    #[test]
    fn test_thumbnail_matches_any_image_extension() {
        let entries = parse_entries(
            r#"[{"id":"1","src":"/videos/a.mp4","thumbnail":"/videos/a.png"}]"#,
        )
        .unwrap();
        let scan = FolderScan::from_file_names(["a.mp4", "a.webp"], &["mp4".to_string()]);
        let diff = diff(&entries, &scan, &defaults()).unwrap();
        assert!(diff.is_clean());
    }

    #[test]
    fn test_merge_sorts_numerically_and_keeps_named_last() {
        let entries =
            parse_entries(r#"[{"id":"10"},{"id":"intro"},{"id":"2"},{"id":"1"}]"#).unwrap();
        let drafts = parse_entries(r#"[{"id":"11"}]"#).unwrap();
        let ids: Vec<_> = merge(&entries, &drafts)
            .into_iter()
            .map(|e| e.id.unwrap_or_default())
            .collect();
        assert_eq!(ids, vec!["1", "2", "10", "11", "intro"]);
    }
}
