use std::io::Write;

use folio_models::{Manifest, ModelError};

#[tokio::test]
async fn load_reads_manifest_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[{{"id": "1", "title": "Intro", "year": 2024, "program": "Premiere",
             "category": "Anime", "thumbnail": "/videos/intro.png", "src": "/videos/intro.mp4"}}]"#
    )
    .unwrap();

    let manifest = Manifest::load(file.path()).await.unwrap();
    assert_eq!(manifest.len(), 1);
    assert_eq!(manifest.videos()[0].title, "Intro");
}

#[tokio::test]
async fn load_missing_file_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Manifest::load(dir.path().join("videos.json")).await.unwrap_err();
    assert!(matches!(err, ModelError::Read { .. }));
}

#[tokio::test]
async fn load_or_empty_degrades_on_bad_json() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "[{{\"id\": ").unwrap();

    let manifest = Manifest::load_or_empty(file.path()).await;
    assert!(manifest.is_empty());
}

#[tokio::test]
async fn load_or_empty_degrades_on_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = Manifest::load_or_empty(dir.path().join("nope.json")).await;
    assert!(manifest.is_empty());
}
