//! Gallery session: binds a [`FilterState`] to a navigable query-string history.
//!
//! The session plays the role of the browser-side view: it owns the current
//! filter, applies user interactions and tells the caller which URL to show.
//! It holds no UI handles, so the whole binding is testable as plain data.

use serde::Serialize;

use folio_models::CategoryFilter;

use crate::catalog::Gallery;
use crate::filter::{FilterState, PageResult};
use crate::view_state::{read_state_from_url, write_state_to_url, ViewState};

/// How a URL change should be recorded in history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryMode {
    /// New history entry
    Push,
    /// Overwrite the current entry
    Replace,
}

/// What the view has to do after a user interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationEffect {
    /// Query string to show, without `?`
    pub query: String,
    pub mode: HistoryMode,
    pub scroll_to_top: bool,
}

/// One browser session on the videos page.
#[derive(Debug, Clone)]
pub struct GallerySession {
    gallery: Gallery,
    filter: FilterState,
    page_size: usize,
    history: Vec<String>,
    cursor: usize,
}

impl GallerySession {
    /// Mount the page at `query`. Search starts empty.
    pub fn open(gallery: Gallery, query: &str, page_size: usize) -> Self {
        let view = read_state_from_url(query);
        let filter = view.apply_to(FilterState::default());
        Self {
            gallery,
            filter,
            page_size: page_size.max(1),
            history: vec![write_state_to_url(&view)],
            cursor: 0,
        }
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    /// Query string of the current history entry.
    pub fn current_query(&self) -> &str {
        &self.history[self.cursor]
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Visible page for the current state.
    pub fn view(&self) -> PageResult<'_> {
        self.gallery.page(&self.filter, self.page_size)
    }

    /// Query string with the page clamped into the available range.
    pub fn canonical_query(&self) -> String {
        let page = self.view().display_page();
        write_state_to_url(&ViewState::new(self.filter.active_category.clone(), page))
    }

    /// Navigation to a URL from outside the page controls (link, address bar).
    ///
    /// Category and page are re-derived from the URL; search text is kept.
    pub fn navigate(&mut self, query: &str) {
        let view = read_state_from_url(query);
        self.filter = view.apply_to(std::mem::take(&mut self.filter));
        self.push(write_state_to_url(&view));
    }

    /// Go back one history entry. Returns false at the start of history.
    pub fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.restore_current();
        true
    }

    /// Go forward one history entry. Returns false at the end of history.
    pub fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.history.len() {
            return false;
        }
        self.cursor += 1;
        self.restore_current();
        true
    }

    /// Click on a category button.
    pub fn select_category(&mut self, category: CategoryFilter) -> NavigationEffect {
        self.filter = std::mem::take(&mut self.filter).with_category(category);
        let query = write_state_to_url(&ViewState::from(&self.filter));
        self.push(query.clone());
        NavigationEffect {
            query,
            mode: HistoryMode::Push,
            scroll_to_top: true,
        }
    }

    /// Click on a pagination control. The page is kept within the available range.
    pub fn select_page(&mut self, page: u32) -> NavigationEffect {
        let total_pages = u32::try_from(self.view().total_pages).unwrap_or(u32::MAX);
        let page = page.clamp(1, total_pages.max(1));
        self.filter = std::mem::take(&mut self.filter).with_page(page);
        let query = write_state_to_url(&ViewState::from(&self.filter));
        self.push(query.clone());
        NavigationEffect {
            query,
            mode: HistoryMode::Push,
            scroll_to_top: true,
        }
    }

    /// Typing in the search box. Returns to the first page in place.
    pub fn set_search(&mut self, text: impl Into<String>) -> NavigationEffect {
        let was_paged = self.filter.page > 1;
        self.filter = std::mem::take(&mut self.filter).with_search(text);
        let query = write_state_to_url(&ViewState::from(&self.filter));
        self.history[self.cursor] = query.clone();
        NavigationEffect {
            query,
            mode: HistoryMode::Replace,
            scroll_to_top: was_paged,
        }
    }

    fn push(&mut self, query: String) {
        if self.history[self.cursor] == query {
            return;
        }
        self.history.truncate(self.cursor + 1);
        self.history.push(query);
        self.cursor = self.history.len() - 1;
    }

    fn restore_current(&mut self) {
        let view = read_state_from_url(&self.history[self.cursor]);
        self.filter = view.apply_to(std::mem::take(&mut self.filter));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_models::{Manifest, VideoRecord};

    fn session(query: &str) -> GallerySession {
        let mut videos = Vec::new();
        for i in 1..=20u64 {
            let category = if i <= 16 { "Anime" } else { "Cars" };
            videos.push(VideoRecord::new(i, format!("Edit {i}"), 2024, "Premiere", category));
        }
        GallerySession::open(Gallery::new(Manifest::new(videos)), query, 16)
    }

    #[test]
    fn test_open_reads_url() {
        let session = session("?category=Anime&page=1");
        assert_eq!(session.filter().active_category, CategoryFilter::named("Anime"));
        assert_eq!(session.filter().page, 1);
        assert_eq!(session.current_query(), "category=Anime");
        assert!(session.filter().search_text.is_empty());
    }

    #[test]
    fn test_select_category_resets_page_and_pushes() {
        let mut session = session("page=2");
        let effect = session.select_category(CategoryFilter::named("Cars"));

        assert_eq!(effect.query, "category=Cars");
        assert_eq!(effect.mode, HistoryMode::Push);
        assert!(effect.scroll_to_top);
        assert_eq!(session.filter().page, 1);
        assert_eq!(session.history(), ["page=2", "category=Cars"]);
    }

    #[test]
    fn test_set_search_replaces_entry() {
        let mut session = session("page=2");
        let effect = session.set_search("edit 1");

        assert_eq!(effect.mode, HistoryMode::Replace);
        assert!(effect.scroll_to_top);
        assert_eq!(effect.query, "");
        assert_eq!(session.history(), [""]);
        assert_eq!(session.filter().search_text, "edit 1");
    }

    #[test]
    fn test_select_page_is_clamped() {
        let mut session = session("");
        let effect = session.select_page(9);
        assert_eq!(effect.query, "page=2");
        assert_eq!(session.view().items.len(), 4);
    }

    #[test]
    fn test_back_and_forward_rederive_state() {
        let mut session = session("");
        session.select_page(2);
        session.select_category(CategoryFilter::named("Cars"));
        session.set_search("edit");

        assert!(session.back());
        assert_eq!(session.filter().page, 2);
        assert_eq!(session.filter().active_category, CategoryFilter::All);
        assert_eq!(session.filter().search_text, "edit");

        assert!(session.forward());
        assert_eq!(session.filter().active_category, CategoryFilter::named("Cars"));
        assert!(!session.forward());
    }

    #[test]
    fn test_navigate_truncates_forward_history() {
        let mut session = session("");
        session.select_page(2);
        session.back();
        session.navigate("category=Cars");
        assert_eq!(session.history(), ["", "category=Cars"]);
        assert!(!session.forward());
    }

    #[test]
    fn test_canonical_query_clamps_stale_page() {
        let session = session("category=Cars&page=7");
        assert_eq!(session.current_query(), "category=Cars&page=7");
        assert_eq!(session.canonical_query(), "category=Cars");
        assert_eq!(session.view().items.len(), 4);
    }
}
