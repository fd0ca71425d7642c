//! Lenient view of a manifest entry.
//!
//! Reconciliation has to cope with hand-edited manifests, so only the fields it
//! reasons about are typed. Everything else round-trips untouched.

use std::path::Path;

use folio_models::VideoRecord;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    #[serde(
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Accepts `"3"`, `3`, `null` or `""`.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

impl ManifestEntry {
    /// Build an entry from a typed record.
    pub fn from_record(record: &VideoRecord) -> serde_json::Result<Self> {
        serde_json::from_value(serde_json::to_value(record)?)
    }

    /// Numeric id, used for ordering the merged manifest.
    pub fn numeric_id(&self) -> Option<u64> {
        self.id.as_deref().and_then(|id| id.trim().parse().ok())
    }

    pub fn src(&self) -> &str {
        self.src.as_deref().unwrap_or_default()
    }

    pub fn thumbnail(&self) -> &str {
        self.thumbnail.as_deref().unwrap_or_default()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_ref().and_then(Value::as_str)
    }
}

/// Parse manifest text into entries.
pub fn parse_entries(raw: &str) -> serde_json::Result<Vec<ManifestEntry>> {
    serde_json::from_str(raw)
}

/// Give every entry without an id its 1-based position.
///
/// Legacy migration for manifests written before ids existed.
pub fn backfill_ids(entries: &mut [ManifestEntry]) -> usize {
    let mut filled = 0;
    for (i, entry) in entries.iter_mut().enumerate() {
        if entry.id.is_none() {
            entry.id = Some((i + 1).to_string());
            filled += 1;
        }
    }
    filled
}

/// File name without directories or extension.
pub fn file_base(path: &str) -> &str {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
}

/// File name without directories.
pub fn file_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_ids() {
        let entries = parse_entries(
            r#"[{"id": "7", "src": "/videos/a.mp4"}, {"id": 8}, {"id": ""}, {"title": "x"}]"#,
        )
        .unwrap();
        let ids: Vec<_> = entries.iter().map(|e| e.id.clone()).collect();
        assert_eq!(
            ids,
            vec![Some("7".to_string()), Some("8".to_string()), None, None]
        );
    }

    #[test]
    fn test_backfill_uses_position() {
        let mut entries =
            parse_entries(r#"[{"id": "1"}, {"title": "no id"}, {"id": ""}]"#).unwrap();
        assert_eq!(backfill_ids(&mut entries), 2);
        assert_eq!(entries[1].id.as_deref(), Some("2"));
        assert_eq!(entries[2].id.as_deref(), Some("3"));
    }

    #[test]
    fn test_unknown_fields_survive() {
        let raw = r#"[{"id":"1","title":"A","featured":true,"tags":["x"]}]"#;
        let entries = parse_entries(raw).unwrap();
        let back = serde_json::to_value(&entries).unwrap();
        assert_eq!(back[0]["featured"], Value::Bool(true));
        assert_eq!(back[0]["tags"][0], "x");
        assert_eq!(back[0]["title"], "A");
    }

    #[test]
    fn test_from_record() {
        let record = VideoRecord::new("3", "clip", 2025, "Adobe Premiere Pro", "TBD")
            .with_assets("/videos/clip.png", "/videos/clip.mp4");
        let entry = ManifestEntry::from_record(&record).unwrap();
        assert_eq!(entry.id.as_deref(), Some("3"));
        assert_eq!(entry.src(), "/videos/clip.mp4");
        assert_eq!(entry.category(), Some("TBD"));
    }

    #[test]
    fn test_file_helpers() {
        assert_eq!(file_base("/videos/a.mp4"), "a");
        assert_eq!(file_name("/videos/a.mp4"), "a.mp4");
        assert_eq!(file_base(""), "");
    }
}
