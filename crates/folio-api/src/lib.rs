//! Axum HTTP server for the video portfolio.
//!
//! This crate provides:
//! - The authenticated R2 storage proxy (PUT/GET/DELETE on `/{key}`)
//! - Uploader routes (multipart upload, listing, download, delete)
//! - The read-only gallery JSON API
//! - Rate limiting, security headers and Prometheus metrics

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::{ApiConfig, StorageBackend};
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
