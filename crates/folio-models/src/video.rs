//! Video record models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a video in the manifest.
///
/// Stored as a string in the manifest file. Older manifests use positional
/// numbers ("1", "2", ...), so [`VideoId::numeric`] is used wherever ordering
/// by id matters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct VideoId(pub String);

impl VideoId {
    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the id, if it is a plain unsigned integer.
    pub fn numeric(&self) -> Option<u64> {
        self.0.trim().parse().ok()
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for VideoId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for VideoId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<u64> for VideoId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

/// One entry of the video manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    /// Unique id, stable across reconciliation runs
    pub id: VideoId,

    /// Display title
    pub title: String,

    /// Release year
    pub year: i32,

    /// Editing tool used (also searchable)
    #[serde(default)]
    pub program: String,

    /// Single category the video belongs to
    pub category: String,

    /// Relative path to the thumbnail image
    #[serde(default)]
    pub thumbnail: String,

    /// Relative path to the video file
    #[serde(default)]
    pub src: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contributors: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music_link: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contributor_link: Option<String>,
}

impl VideoRecord {
    /// Create a record with the required fields and no optional metadata.
    pub fn new(
        id: impl Into<VideoId>,
        title: impl Into<String>,
        year: i32,
        program: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            year,
            program: program.into(),
            category: category.into(),
            thumbnail: String::new(),
            src: String::new(),
            description: None,
            contributors: None,
            music: None,
            music_link: None,
            contributor_link: None,
        }
    }

    /// Set asset paths.
    pub fn with_assets(mut self, thumbnail: impl Into<String>, src: impl Into<String>) -> Self {
        self.thumbnail = thumbnail.into();
        self.src = src.into();
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Case-insensitive substring match against title and program.
    ///
    /// `needle` must already be lower-cased. An empty needle matches everything.
    pub fn matches_search(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.title.to_lowercase().contains(needle)
            || self.program.to_lowercase().contains(needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_id_numeric() {
        assert_eq!(VideoId::from("12").numeric(), Some(12));
        assert_eq!(VideoId::from(" 7 ").numeric(), Some(7));
        assert_eq!(VideoId::from("intro").numeric(), None);
        assert_eq!(VideoId::from(3u64).as_str(), "3");
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let mut record = VideoRecord::new("1", "Opening", 2024, "Adobe Premiere Pro", "Anime")
            .with_assets("/videos/1.png", "/videos/1.mp4");
        record.music_link = Some("https://example.com/track".to_string());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["musicLink"], "https://example.com/track");
        assert!(json.get("contributorLink").is_none());
    }

    #[test]
    fn test_record_schema() {
        let schema = serde_json::to_value(schemars::schema_for!(VideoRecord)).unwrap();
        let required = schema["required"].as_array().unwrap();
        assert!(required.iter().any(|f| f == "title"));
        assert!(!required.iter().any(|f| f == "thumbnail"));
        assert!(schema["properties"].get("musicLink").is_some());
    }

    #[test]
    fn test_record_deserializes_manifest_entry() {
        let json = r#"{
            "id": "4",
            "title": "Drift",
            "year": 2023,
            "program": "DaVinci Resolve",
            "category": "Cars",
            "thumbnail": "/videos/drift.png",
            "src": "/videos/drift.mp4",
            "contributorLink": "https://example.com/crew"
        }"#;

        let record: VideoRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, VideoId::from("4"));
        assert_eq!(record.contributor_link.as_deref(), Some("https://example.com/crew"));
        assert!(record.description.is_none());
    }

    #[test]
    fn test_matches_search() {
        let record = VideoRecord::new("1", "Night Ride", 2024, "Adobe Premiere Pro", "Cars");
        assert!(record.matches_search("premiere"));
        assert!(record.matches_search("night"));
        assert!(record.matches_search(""));
        assert!(!record.matches_search("resolve"));
    }
}
