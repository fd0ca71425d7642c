//! Read-only catalog over a loaded manifest.

use std::path::Path;

use folio_models::{CategoryFilter, Manifest, VideoId, VideoRecord, ALL_CATEGORIES};
use tracing::{info, warn};

use crate::featured;
use crate::filter::{filter_and_paginate, FilterState, PageResult};

/// Blurbs shown under the home page carousel for known categories.
const CATEGORY_DESCRIPTIONS: &[(&str, &str)] = &[
    (
        "Anime + Music",
        "Fast-paced anime edits with energetic beats and stylish motion.",
    ),
    (
        "Anime",
        "A selection of cinematic anime edits and visual experiments.",
    ),
];

const ALL_DESCRIPTION: &str =
    "Here you see 4 random videos. Click on a category or Videos page to explore more!";

const FALLBACK_DESCRIPTION: &str =
    "Here you see 4 random videos from this category. Visit the Videos page to see more!";

/// The gallery's content for one session, loaded once.
#[derive(Debug, Clone, Default)]
pub struct Gallery {
    manifest: Manifest,
}

impl Gallery {
    pub fn new(manifest: Manifest) -> Self {
        Self { manifest }
    }

    /// Load the manifest file. Any failure yields an empty gallery.
    pub async fn load(path: impl AsRef<Path>) -> Self {
        let manifest = Manifest::load_or_empty(path).await;
        if let Err(violations) = manifest.validate() {
            for violation in &violations {
                warn!("Manifest issue: {}", violation);
            }
        }
        info!("Gallery loaded with {} videos", manifest.len());
        Self::new(manifest)
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn videos(&self) -> &[VideoRecord] {
        self.manifest.videos()
    }

    /// `"All"` followed by every distinct category in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut categories = vec![ALL_CATEGORIES.to_string()];
        for video in self.videos() {
            if !categories.iter().any(|c| c == &video.category) {
                categories.push(video.category.clone());
            }
        }
        categories
    }

    pub fn find(&self, id: &VideoId) -> Option<&VideoRecord> {
        self.manifest.get(id)
    }

    /// Every video except `id`, in manifest order.
    pub fn others(&self, id: &VideoId) -> Vec<&VideoRecord> {
        self.videos().iter().filter(|v| &v.id != id).collect()
    }

    pub fn page(&self, filter: &FilterState, page_size: usize) -> PageResult<'_> {
        filter_and_paginate(self.videos(), filter, page_size)
    }

    /// Featured pick; seeded when `seed` is given.
    pub fn featured(
        &self,
        category: &CategoryFilter,
        count: usize,
        seed: Option<u64>,
    ) -> Vec<&VideoRecord> {
        match seed {
            Some(seed) => featured::select_featured_seeded(self.videos(), category, count, seed),
            None => featured::select_featured_random(self.videos(), category, count),
        }
    }
}

/// Text shown under the home page carousel for a category.
pub fn category_description(category: &CategoryFilter) -> &'static str {
    match category {
        CategoryFilter::All => ALL_DESCRIPTION,
        CategoryFilter::Named(name) => CATEGORY_DESCRIPTIONS
            .iter()
            .find(|(known, _)| *known == name.as_str())
            .map(|(_, text)| *text)
            .unwrap_or(FALLBACK_DESCRIPTION),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gallery() -> Gallery {
        Gallery::new(Manifest::new(vec![
            VideoRecord::new("1", "Intro", 2024, "Premiere", "Anime"),
            VideoRecord::new("2", "Drift", 2023, "Resolve", "Cars"),
            VideoRecord::new("3", "Beat", 2024, "Premiere", "Anime + Music"),
            VideoRecord::new("4", "Outro", 2022, "Premiere", "Anime"),
        ]))
    }

    #[test]
    fn test_categories_first_seen_order() {
        assert_eq!(
            gallery().categories(),
            vec!["All", "Anime", "Cars", "Anime + Music"]
        );
    }

    #[test]
    fn test_categories_of_empty_gallery() {
        assert_eq!(Gallery::default().categories(), vec!["All"]);
    }

    #[test]
    fn test_find_and_others() {
        let gallery = gallery();
        let id = VideoId::from("2");
        assert_eq!(gallery.find(&id).unwrap().title, "Drift");

        let others: Vec<_> = gallery.others(&id).into_iter().map(|v| v.id.as_str()).collect();
        assert_eq!(others, vec!["1", "3", "4"]);
    }

    #[test]
    fn test_category_description() {
        assert_eq!(category_description(&CategoryFilter::All), ALL_DESCRIPTION);
        assert!(category_description(&CategoryFilter::named("Anime")).starts_with("A selection"));
        assert_eq!(
            category_description(&CategoryFilter::named("Cars")),
            FALLBACK_DESCRIPTION
        );
    }
}
