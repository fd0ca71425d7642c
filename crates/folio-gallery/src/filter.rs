//! Filter/pagination engine.
//!
//! Pure functions from `(manifest, FilterState, page_size)` to the visible page.
//! Nothing here touches the URL, the clock or a random source.

use folio_models::{CategoryFilter, VideoRecord};
use serde::{Deserialize, Serialize};

/// Default number of cards per gallery page.
pub const DEFAULT_PAGE_SIZE: usize = 16;

/// Everything that decides which slice of the manifest is visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// Free text matched against title and program (session-only)
    pub search_text: String,
    /// Category selector
    pub active_category: CategoryFilter,
    /// 1-based page number as requested (may be out of range)
    pub page: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            active_category: CategoryFilter::All,
            page: 1,
        }
    }
}

impl FilterState {
    pub fn new(active_category: CategoryFilter, search_text: impl Into<String>, page: u32) -> Self {
        Self {
            search_text: search_text.into(),
            active_category,
            page: page.max(1),
        }
    }

    /// Select a category. Always returns to the first page.
    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.active_category = category;
        self.page = 1;
        self
    }

    /// Replace the search text. Always returns to the first page.
    pub fn with_search(mut self, search_text: impl Into<String>) -> Self {
        self.search_text = search_text.into();
        self.page = 1;
        self
    }

    /// Jump to a page. Values below 1 become 1.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// 0-based page index requested by this state.
    pub fn page_index(&self) -> usize {
        self.page.saturating_sub(1) as usize
    }
}

/// One page of filtered videos plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResult<'a> {
    pub items: Vec<&'a VideoRecord>,
    /// Size of the whole filtered set
    pub total_items: usize,
    /// 0 when the filtered set is empty
    pub total_pages: usize,
    /// 0-based index of the page actually shown, clamped into range
    pub current_page: usize,
}

impl PageResult<'_> {
    /// 1-based page number for display and URLs. 1 when there are no pages.
    pub fn display_page(&self) -> u32 {
        u32::try_from(self.current_page + 1).unwrap_or(u32::MAX)
    }

    pub fn has_pages(&self) -> bool {
        self.total_pages > 0
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 0
    }

    pub fn has_next(&self) -> bool {
        self.current_page + 1 < self.total_pages
    }
}

/// Apply the category filter, then the search filter.
pub fn filter_videos<'a>(videos: &'a [VideoRecord], filter: &FilterState) -> Vec<&'a VideoRecord> {
    let needle = filter.search_text.to_lowercase();
    videos
        .iter()
        .filter(|v| filter.active_category.matches(&v.category))
        .filter(|v| v.matches_search(&needle))
        .collect()
}

/// Filter the manifest and cut out the requested page.
///
/// A `page_size` of 0 is treated as 1. Out-of-range pages are clamped to the
/// nearest valid page, never an error.
pub fn filter_and_paginate<'a>(
    videos: &'a [VideoRecord],
    filter: &FilterState,
    page_size: usize,
) -> PageResult<'a> {
    let page_size = page_size.max(1);
    let filtered = filter_videos(videos, filter);
    let total_items = filtered.len();
    let total_pages = total_items.div_ceil(page_size);

    if total_pages == 0 {
        return PageResult {
            items: Vec::new(),
            total_items,
            total_pages,
            current_page: 0,
        };
    }

    let current_page = filter.page_index().min(total_pages - 1);
    let start = current_page * page_size;
    let end = (start + page_size).min(total_items);

    PageResult {
        items: filtered[start..end].to_vec(),
        total_items,
        total_pages,
        current_page,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<VideoRecord> {
        let mut videos = Vec::new();
        for i in 0..16 {
            videos.push(VideoRecord::new(
                (i + 1) as u64,
                format!("Anime edit {i}"),
                2024,
                "After Effects",
                "Anime",
            ));
        }
        for i in 16..20 {
            videos.push(VideoRecord::new(
                (i + 1) as u64,
                format!("Car edit {i}"),
                2023,
                "Adobe Premiere Pro",
                "Cars",
            ));
        }
        videos
    }

    #[test]
    fn test_all_category_pages() {
        let videos = sample();
        let first = filter_and_paginate(&videos, &FilterState::default(), 16);
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.items.len(), 16);
        assert_eq!(first.current_page, 0);
        assert!(first.has_next());
        assert!(!first.has_previous());

        let second = filter_and_paginate(&videos, &FilterState::default().with_page(2), 16);
        assert_eq!(second.items.len(), 4);
        assert_eq!(second.display_page(), 2);
        assert!(!second.has_next());
    }

    #[test]
    fn test_single_category() {
        let videos = sample();
        let state = FilterState::default().with_category(CategoryFilter::named("Cars"));
        let result = filter_and_paginate(&videos, &state, 16);
        assert_eq!(result.total_pages, 1);
        assert_eq!(result.items.len(), 4);
        assert!(result.items.iter().all(|v| v.category == "Cars"));
    }

    #[test]
    fn test_search_matches_program_case_insensitively() {
        let videos = sample();
        let state = FilterState::default().with_search("PREMIERE");
        let result = filter_and_paginate(&videos, &state, 16);
        assert_eq!(result.total_items, 4);

        let state = FilterState::default()
            .with_category(CategoryFilter::named("Anime"))
            .with_search("premiere");
        assert_eq!(filter_and_paginate(&videos, &state, 16).total_items, 0);
    }

    #[test]
    fn test_stale_page_is_clamped() {
        let videos = sample();
        let state = FilterState::default().with_page(99);
        let result = filter_and_paginate(&videos, &state, 16);
        assert_eq!(result.current_page, 1);
        assert_eq!(result.items.len(), 4);
    }

    #[test]
    fn test_empty_manifest() {
        let result = filter_and_paginate(&[], &FilterState::default().with_page(3), 16);
        assert_eq!(result.total_pages, 0);
        assert_eq!(result.current_page, 0);
        assert!(result.items.is_empty());
        assert!(!result.has_pages());
        assert_eq!(result.display_page(), 1);
    }

    #[test]
    fn test_zero_page_size_is_one() {
        let videos = sample();
        let result = filter_and_paginate(&videos, &FilterState::default(), 0);
        assert_eq!(result.total_pages, 20);
        assert_eq!(result.items.len(), 1);
    }

    #[test]
    fn test_transitions_reset_page() {
        let state = FilterState::default().with_page(5);
        assert_eq!(state.clone().with_category(CategoryFilter::named("Cars")).page, 1);
        assert_eq!(state.clone().with_search("drift").page, 1);
        assert_eq!(state.with_page(0).page, 1);
    }
}
