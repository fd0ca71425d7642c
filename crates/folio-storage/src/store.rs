//! Object store abstraction shared by the R2 client and the in-memory store.

use std::path::Path;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::{StorageError, StorageResult};

/// Maximum object key length accepted by R2.
pub const MAX_KEY_LENGTH: usize = 1024;

/// HTTP metadata stored alongside an object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectMetadata {
    pub content_type: Option<String>,
    pub content_disposition: Option<String>,
    pub content_encoding: Option<String>,
    pub content_language: Option<String>,
    pub cache_control: Option<String>,
}

impl ObjectMetadata {
    /// Metadata with only a content type.
    pub fn with_content_type(content_type: impl Into<String>) -> Self {
        Self {
            content_type: Some(content_type.into()),
            ..Self::default()
        }
    }
}

/// An object read back from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub key: String,
    pub body: Vec<u8>,
    pub metadata: ObjectMetadata,
    /// Quoted entity tag
    pub etag: Option<String>,
    /// Last modified timestamp (milliseconds since epoch)
    pub last_modified: Option<u64>,
}

/// Information about a stored object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectInfo {
    /// Object key
    pub key: String,
    /// Size in bytes
    pub size: u64,
    /// Last modified timestamp (milliseconds since epoch)
    pub last_modified: Option<u64>,
}

/// Minimal object storage operations needed by the proxy and the uploader.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `body` under `key`, replacing any existing object.
    async fn put_object(
        &self,
        key: &str,
        body: Vec<u8>,
        metadata: &ObjectMetadata,
    ) -> StorageResult<()>;

    /// Store a local file under `key`.
    async fn put_file(
        &self,
        path: &Path,
        key: &str,
        metadata: &ObjectMetadata,
    ) -> StorageResult<()> {
        let body = tokio::fs::read(path).await?;
        self.put_object(key, body, metadata).await
    }

    /// Fetch an object. Missing keys yield [`StorageError::NotFound`].
    async fn get_object(&self, key: &str) -> StorageResult<StoredObject>;

    /// Remove an object. Removing a missing key succeeds.
    async fn delete_object(&self, key: &str) -> StorageResult<()>;

    /// List objects under `prefix`, at most `limit` when given.
    async fn list_objects(&self, prefix: &str, limit: Option<usize>) -> StorageResult<Vec<ObjectInfo>>;

    /// Cheap reachability check for readiness probes.
    async fn check_connectivity(&self) -> StorageResult<()>;
}

/// Reject keys the proxy must never forward.
pub fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey("key is empty".to_string()));
    }
    if key.len() > MAX_KEY_LENGTH {
        return Err(StorageError::InvalidKey(format!(
            "key exceeds {} bytes",
            MAX_KEY_LENGTH
        )));
    }
    if key.chars().any(char::is_control) {
        return Err(StorageError::InvalidKey(
            "key contains control characters".to_string(),
        ));
    }
    Ok(())
}

/// Content type for an uploaded media file, by extension.
pub fn content_type_for(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("mp4") | Some("m4v") => "video/mp4",
        Some("mov") => "video/quicktime",
        Some("webm") => "video/webm",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("json") => "application/json",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("clip.mp4").is_ok());
        assert!(validate_key("folder/clip.mp4").is_ok());
        assert!(matches!(validate_key(""), Err(StorageError::InvalidKey(_))));
        assert!(validate_key("bad\nkey").is_err());
        assert!(validate_key(&"a".repeat(MAX_KEY_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("a.mp4"), "video/mp4");
        assert_eq!(content_type_for("A.PNG"), "image/png");
        assert_eq!(content_type_for("thumb.jpeg"), "image/jpeg");
        assert_eq!(content_type_for("notes"), "application/octet-stream");
    }
}
