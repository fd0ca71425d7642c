use std::path::Path;

use async_trait::async_trait;
use folio_storage::{
    discover_videos, upload_batch, InMemoryStore, ObjectInfo, ObjectMetadata, ObjectStore,
    StorageError, StorageResult, StoredObject, UploadOutcome,
};

async fn write(dir: &Path, name: &str, body: &[u8]) {
    tokio::fs::write(dir.join(name), body).await.unwrap();
}

#[tokio::test]
async fn discovers_only_matching_extension() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "b.mp4", b"b").await;
    write(dir.path(), "a.MP4", b"a").await;
    write(dir.path(), "a.png", b"p").await;
    tokio::fs::create_dir(dir.path().join("nested.mp4")).await.unwrap();

    let found = discover_videos(dir.path(), "mp4").await.unwrap();
    assert_eq!(found, vec!["a.MP4".to_string(), "b.mp4".to_string()]);
}

#[tokio::test]
async fn missing_folder_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = discover_videos(&dir.path().join("nope"), "mp4").await.unwrap_err();
    assert!(matches!(err, StorageError::Io(_)));
}

#[tokio::test]
async fn uploads_files_and_skips_missing_ones() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "2.mp4", b"two").await;
    write(dir.path(), "10.mp4", b"ten").await;

    let store = InMemoryStore::new();
    let files = vec!["2.mp4".to_string(), "5.mp4".to_string(), "10.mp4".to_string()];
    let report = upload_batch(&store, dir.path(), &files).await;

    assert_eq!(report.uploaded(), 2);
    assert_eq!(report.skipped(), 1);
    assert!(!report.has_failures());
    assert_eq!(report.outcomes[1], UploadOutcome::Skipped { key: "5.mp4".into() });

    let obj = store.get_object("10.mp4").await.unwrap();
    assert_eq!(obj.body, b"ten");
    assert_eq!(obj.metadata.content_type.as_deref(), Some("video/mp4"));
}

/// Store that rejects one specific key.
struct FlakyStore {
    inner: InMemoryStore,
    reject: &'static str,
}

#[async_trait]
impl ObjectStore for FlakyStore {
    async fn put_object(
        &self,
        key: &str,
        body: Vec<u8>,
        metadata: &ObjectMetadata,
    ) -> StorageResult<()> {
        if key == self.reject {
            return Err(StorageError::upload_failed("rejected"));
        }
        self.inner.put_object(key, body, metadata).await
    }

    async fn get_object(&self, key: &str) -> StorageResult<StoredObject> {
        self.inner.get_object(key).await
    }

    async fn delete_object(&self, key: &str) -> StorageResult<()> {
        self.inner.delete_object(key).await
    }

    async fn list_objects(&self, prefix: &str, limit: Option<usize>) -> StorageResult<Vec<ObjectInfo>> {
        self.inner.list_objects(prefix, limit).await
    }

    async fn check_connectivity(&self) -> StorageResult<()> {
        Ok(())
    }
}

#[tokio::test]
async fn one_failure_does_not_stop_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["1.mp4", "2.mp4", "3.mp4"] {
        write(dir.path(), name, name.as_bytes()).await;
    }

    let store = FlakyStore {
        inner: InMemoryStore::new(),
        reject: "2.mp4",
    };
    let files: Vec<String> = ["1.mp4", "2.mp4", "3.mp4"].iter().map(|s| s.to_string()).collect();
    let report = upload_batch(&store, dir.path(), &files).await;

    assert_eq!(report.uploaded(), 2);
    assert_eq!(report.failed(), 1);
    assert!(report.has_failures());
    assert!(store.inner.contains("3.mp4").await);
    assert!(!store.inner.contains("2.mp4").await);
}
