//! URL view-state synchronization.
//!
//! Only the category and the page live in the query string. Search text is
//! session-only and never written to the URL.

use folio_models::CategoryFilter;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::filter::FilterState;

/// Query parameter holding the active category.
pub const CATEGORY_PARAM: &str = "category";

/// Query parameter holding the 1-based page number.
pub const PAGE_PARAM: &str = "page";

/// The URL-persisted part of [`FilterState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub category: CategoryFilter,
    pub page: u32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            category: CategoryFilter::All,
            page: 1,
        }
    }
}

impl ViewState {
    pub fn new(category: CategoryFilter, page: u32) -> Self {
        Self {
            category,
            page: page.max(1),
        }
    }

    /// Merge into a filter state, keeping its search text.
    pub fn apply_to(&self, filter: FilterState) -> FilterState {
        FilterState {
            search_text: filter.search_text,
            active_category: self.category.clone(),
            page: self.page,
        }
    }
}

impl From<&FilterState> for ViewState {
    fn from(filter: &FilterState) -> Self {
        Self::new(filter.active_category.clone(), filter.page)
    }
}

/// Parse `category` and `page` from a query string.
///
/// A leading `?` is accepted. Missing, blank, non-numeric or `< 1` values fall
/// back to `All` / `1`. When a parameter repeats, the first occurrence wins.
/// Unknown parameters are ignored.
pub fn read_state_from_url(query: &str) -> ViewState {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut category = None;
    let mut page = None;

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            CATEGORY_PARAM if category.is_none() => category = Some(CategoryFilter::parse(&value)),
            PAGE_PARAM if page.is_none() => page = Some(parse_page(&value)),
            _ => {}
        }
    }

    ViewState {
        category: category.unwrap_or_default(),
        page: page.unwrap_or(1),
    }
}

/// Serialize a view state into a query string (without the leading `?`).
///
/// Defaults are omitted, so the default state yields an empty string.
pub fn write_state_to_url(state: &ViewState) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    if let CategoryFilter::Named(name) = &state.category {
        serializer.append_pair(CATEGORY_PARAM, name);
    }
    if state.page > 1 {
        serializer.append_pair(PAGE_PARAM, &state.page.to_string());
    }
    serializer.finish()
}

/// Digit strings too large for `u32` saturate so the engine clamps them to
/// the last page.
fn parse_page(value: &str) -> u32 {
    let value = value.trim();
    match value.parse::<u32>() {
        Ok(page) if page >= 1 => page,
        Ok(_) => 1,
        Err(_) if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) => {
            if value.bytes().all(|b| b == b'0') {
                1
            } else {
                u32::MAX
            }
        }
        Err(_) => 1,
    }
}
