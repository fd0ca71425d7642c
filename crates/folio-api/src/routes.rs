//! API routes.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::limit::RequestBodyLimitLayer;

use crate::handlers::{
    delete_file, download_file, featured, get_video, health, list_categories, list_files,
    list_videos, proxy, ready, upload_file,
};
use crate::metrics::metrics_middleware;
use crate::middleware::{
    cors_layer, rate_limit_middleware, request_id, request_logging, require_auth_key,
    security_headers, RateLimiterCache,
};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let rate_limiter = Arc::new(RateLimiterCache::new(state.config.rate_limit_rps));

    // Public, read-only
    let gallery_routes = Router::new()
        .route("/videos", get(list_videos))
        .route("/videos/:id", get(get_video))
        .route("/categories", get(list_categories))
        .route("/featured", get(featured));

    let uploader_routes = Router::new()
        .route("/upload", post(upload_file))
        .route("/files", get(list_files).delete(delete_file))
        .route("/download", get(download_file))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth_key))
        .layer(middleware::from_fn_with_state(
            rate_limiter.clone(),
            rate_limit_middleware,
        ));

    // Everything not matched above is an object key. Auth is checked inside
    // the handler so unknown verbs still get 403 before 405.
    let proxy_routes = Router::new().fallback(proxy).layer(middleware::from_fn_with_state(
        rate_limiter,
        rate_limit_middleware,
    ));

    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready));

    let metrics_routes = if let Some(handle) = metrics_handle {
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    Router::new()
        .nest("/api", gallery_routes)
        .nest("/uploader", uploader_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        .merge(proxy_routes)
        // Uploads are bounded by RequestBodyLimitLayer instead of axum's 2MB default
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(security_headers))
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
