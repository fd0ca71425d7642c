//! Media folder scanning.

use std::collections::BTreeSet;
use std::path::Path;

use crate::entry::file_base;
use crate::error::{ReconcileError, ReconcileResult};

pub const DEFAULT_VIDEO_EXTENSIONS: &[&str] = &["mp4"];
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// Video and image files found in the media folder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderScan {
    /// Video file names, sorted
    pub videos: Vec<String>,
    /// Base names of image files
    pub image_bases: BTreeSet<String>,
}

impl FolderScan {
    /// Partition plain file names into videos and images.
    pub fn from_file_names<I, S>(names: I, video_extensions: &[String]) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut scan = Self::default();

        for name in names {
            let name = name.as_ref();
            if is_hidden(name) {
                continue;
            }
            if has_extension(name, video_extensions.iter().map(String::as_str)) {
                scan.videos.push(name.to_string());
            } else if has_extension(name, IMAGE_EXTENSIONS.iter().copied()) {
                scan.image_bases.insert(file_base(name).to_string());
            }
        }

        scan.videos.sort();
        scan
    }

    pub fn has_video(&self, file_name: &str) -> bool {
        self.videos.iter().any(|v| v == file_name)
    }

    pub fn has_image(&self, base: &str) -> bool {
        self.image_bases.contains(base)
    }
}

/// System and temporary files that never count as media.
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
        || name.ends_with(".DS_Store")
        || name.ends_with("Thumbs.db")
        || name.ends_with(".tmp")
}

fn has_extension<'a>(name: &str, mut extensions: impl Iterator<Item = &'a str>) -> bool {
    let Some(ext) = Path::new(name).extension().and_then(|e| e.to_str()) else {
        return false;
    };
    extensions.any(|candidate| candidate.eq_ignore_ascii_case(ext))
}

/// Names of the regular files directly inside `dir`.
pub async fn list_file_names(dir: &Path) -> ReconcileResult<Vec<String>> {
    let read_err = |source| ReconcileError::ReadFolder {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = tokio::fs::read_dir(dir).await.map_err(read_err)?;
    let mut names = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(read_err)? {
        let file_type = entry.file_type().await.map_err(read_err)?;
        if file_type.is_dir() {
            continue;
        }
        names.push(entry.file_name().to_string_lossy().into_owned());
    }

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mp4() -> Vec<String> {
        vec!["mp4".to_string()]
    }

    #[test]
    fn test_hidden_files() {
        assert!(is_hidden(".gitkeep"));
        assert!(is_hidden("folder.DS_Store"));
        assert!(is_hidden("Thumbs.db"));
        assert!(is_hidden("render.tmp"));
        assert!(!is_hidden("a.mp4"));
    }

    #[test]
    fn test_partition() {
        let scan = FolderScan::from_file_names(
            ["b.mp4", "a.MP4", "a.png", "b.JPG", "c.webp", ".hidden.mp4", "notes.txt"],
            &mp4(),
        );
        assert_eq!(scan.videos, vec!["a.MP4", "b.mp4"]);
        assert!(scan.has_image("a"));
        assert!(scan.has_image("b"));
        assert!(scan.has_image("c"));
        assert_eq!(scan.image_bases.len(), 3);
    }

    #[test]
    fn test_custom_video_extensions() {
        let exts = vec!["mp4".to_string(), "mov".to_string()];
        let scan = FolderScan::from_file_names(["a.mov", "b.mp4", "c.webm"], &exts);
        assert_eq!(scan.videos, vec!["a.mov", "b.mp4"]);
    }
}
