//! Read-only gallery JSON API.

use axum::extract::{Path, Query, RawQuery, State};
use axum::Json;
use folio_gallery::{
    category_description, read_state_from_url, write_state_to_url, FilterState, ViewState,
    DEFAULT_FEATURED_COUNT,
};
use folio_models::{CategoryFilter, VideoId, VideoRecord};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Upper bound on `count` for the featured endpoint.
pub const MAX_FEATURED_COUNT: usize = 50;

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// One page of the gallery grid.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoPageResponse<'a> {
    pub items: Vec<&'a VideoRecord>,
    pub total_items: usize,
    pub total_pages: usize,
    /// 1-based page actually shown
    pub page: u32,
    pub has_previous: bool,
    pub has_next: bool,
    pub category: String,
    /// Canonical query string for this view, page clamped into range
    pub query: String,
}

/// `GET /api/videos?category=&page=&q=`
pub async fn list_videos(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
    Query(search): Query<SearchQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let view = read_state_from_url(raw.as_deref().unwrap_or_default());
    let filter = FilterState::new(
        view.category.clone(),
        search.q.unwrap_or_default(),
        view.page,
    );

    let result = state.gallery.page(&filter, state.config.page_size);
    let page = result.display_page();
    let response = VideoPageResponse {
        has_previous: result.has_previous(),
        has_next: result.has_next(),
        total_items: result.total_items,
        total_pages: result.total_pages,
        page,
        category: view.category.to_string(),
        query: write_state_to_url(&ViewState::new(view.category, page)),
        items: result.items,
    };

    serde_json::to_value(&response)
        .map(Json)
        .map_err(|e| ApiError::internal(e.to_string()))
}

#[derive(Serialize)]
pub struct VideoDetailResponse<'a> {
    pub video: &'a VideoRecord,
    pub others: Vec<&'a VideoRecord>,
}

/// `GET /api/videos/:id`
pub async fn get_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    let id = VideoId::from_string(id);
    let video = state
        .gallery
        .find(&id)
        .ok_or_else(|| ApiError::not_found(format!("Video {}", id)))?;

    let response = VideoDetailResponse {
        video,
        others: state.gallery.others(&id),
    };
    serde_json::to_value(&response)
        .map(Json)
        .map_err(|e| ApiError::internal(e.to_string()))
}

#[derive(Serialize)]
pub struct CategorySummary {
    pub name: String,
    pub description: &'static str,
}

/// `GET /api/categories`
pub async fn list_categories(State(state): State<AppState>) -> Json<Vec<CategorySummary>> {
    let categories = state
        .gallery
        .categories()
        .into_iter()
        .map(|name| {
            let description = category_description(&CategoryFilter::parse(&name));
            CategorySummary { name, description }
        })
        .collect();
    Json(categories)
}

#[derive(Debug, Deserialize)]
pub struct FeaturedQuery {
    pub category: Option<String>,
    pub count: Option<usize>,
    pub seed: Option<u64>,
}

#[derive(Serialize)]
pub struct FeaturedResponse<'a> {
    pub category: String,
    pub description: &'static str,
    pub videos: Vec<&'a VideoRecord>,
}

/// `GET /api/featured?category=&count=&seed=`
pub async fn featured(
    State(state): State<AppState>,
    Query(query): Query<FeaturedQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let category = CategoryFilter::parse(query.category.as_deref().unwrap_or_default());
    let count = query
        .count
        .unwrap_or(DEFAULT_FEATURED_COUNT)
        .min(MAX_FEATURED_COUNT);

    let response = FeaturedResponse {
        description: category_description(&category),
        videos: state.gallery.featured(&category, count, query.seed),
        category: category.to_string(),
    };
    serde_json::to_value(&response)
        .map(Json)
        .map_err(|e| ApiError::internal(e.to_string()))
}
