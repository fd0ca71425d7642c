//! Gallery state model.
//!
//! This crate provides:
//! - The deterministic filter/pagination engine
//! - URL view-state parsing and serialization
//! - A session type binding filter state to query-string history
//! - Seeded and unseeded featured-video selection
//! - Catalog queries (categories, detail lookups)

pub mod catalog;
pub mod featured;
pub mod filter;
pub mod session;
pub mod view_state;

pub use catalog::{category_description, Gallery};
pub use featured::{
    select_featured, select_featured_random, select_featured_seeded, DEFAULT_FEATURED_COUNT,
};
pub use filter::{filter_and_paginate, filter_videos, FilterState, PageResult, DEFAULT_PAGE_SIZE};
pub use session::{GallerySession, HistoryMode, NavigationEffect};
pub use view_state::{read_state_from_url, write_state_to_url, ViewState};
