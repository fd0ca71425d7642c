//! The video manifest: the ordered list of records driving the gallery.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::category::ALL_CATEGORIES;
use crate::error::{ManifestViolation, ModelError, ModelResult};
use crate::video::{VideoId, VideoRecord};

/// Ordered collection of video records.
///
/// Serializes as a bare JSON array, matching the on-disk manifest format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    videos: Vec<VideoRecord>,
}

impl Manifest {
    pub fn new(videos: Vec<VideoRecord>) -> Self {
        Self { videos }
    }

    /// Empty manifest.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a manifest from JSON text.
    pub fn from_json_str(json: &str) -> ModelResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a manifest file.
    pub async fn load(path: impl AsRef<Path>) -> ModelResult<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ModelError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let manifest = Self::from_json_str(&raw)?;
        debug!("Loaded {} videos from {}", manifest.len(), path.display());
        Ok(manifest)
    }

    /// Load a manifest, degrading to an empty one on any failure.
    ///
    /// The gallery treats an unavailable manifest as "no videos yet", never as
    /// a crash.
    pub async fn load_or_empty(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path).await {
            Ok(manifest) => manifest,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Manifest unavailable, using empty gallery");
                Self::empty()
            }
        }
    }

    /// Check record-level invariants. Returns every violation found.
    pub fn validate(&self) -> Result<(), Vec<ManifestViolation>> {
        let mut seen = HashSet::new();
        let mut violations = Vec::new();

        for video in &self.videos {
            let id = video.id.to_string();
            if !seen.insert(video.id.as_str()) {
                violations.push(ManifestViolation::DuplicateId(id.clone()));
            }
            if video.title.trim().is_empty() {
                violations.push(ManifestViolation::EmptyTitle(id.clone()));
            }
            if video.category.trim().is_empty() {
                violations.push(ManifestViolation::EmptyCategory(id));
            } else if video.category == ALL_CATEGORIES {
                violations.push(ManifestViolation::ReservedCategory(id));
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }

    pub fn videos(&self) -> &[VideoRecord] {
        &self.videos
    }

    pub fn into_videos(self) -> Vec<VideoRecord> {
        self.videos
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }

    /// Find a record by id.
    pub fn get(&self, id: &VideoId) -> Option<&VideoRecord> {
        self.videos.iter().find(|v| &v.id == id)
    }
}

impl From<Vec<VideoRecord>> for Manifest {
    fn from(videos: Vec<VideoRecord>) -> Self {
        Self::new(videos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, category: &str) -> VideoRecord {
        VideoRecord::new(id, format!("Video {id}"), 2024, "Adobe Premiere Pro", category)
    }

    #[test]
    fn test_parse_bare_array() {
        let json = r#"[
            {"id": "1", "title": "A", "year": 2024, "program": "Premiere", "category": "Anime",
             "thumbnail": "/videos/a.png", "src": "/videos/a.mp4"}
        ]"#;
        let manifest = Manifest::from_json_str(json).unwrap();
        assert_eq!(manifest.len(), 1);
        assert_eq!(manifest.videos()[0].src, "/videos/a.mp4");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            Manifest::from_json_str("{not json"),
            Err(ModelError::Parse(_))
        ));
    }

    #[test]
    fn test_validate_reports_all_violations() {
        let mut untitled = record("3", "Cars");
        untitled.title = "  ".to_string();

        let manifest = Manifest::new(vec![
            record("1", "Anime"),
            record("1", "Cars"),
            record("2", "All"),
            untitled,
            record("4", ""),
        ]);

        let violations = manifest.validate().unwrap_err();
        assert_eq!(
            violations,
            vec![
                ManifestViolation::DuplicateId("1".to_string()),
                ManifestViolation::ReservedCategory("2".to_string()),
                ManifestViolation::EmptyTitle("3".to_string()),
                ManifestViolation::EmptyCategory("4".to_string()),
            ]
        );
    }

    #[test]
    fn test_get_by_id() {
        let manifest = Manifest::new(vec![record("1", "Anime"), record("2", "Cars")]);
        assert_eq!(manifest.get(&VideoId::from("2")).unwrap().category, "Cars");
        assert!(manifest.get(&VideoId::from("9")).is_none());
    }
}
