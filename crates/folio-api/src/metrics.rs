//! Prometheus metrics for the API server.

use std::sync::LazyLock;
use std::time::Instant;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::middleware::Next;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use regex_lite::Regex;

/// Install the Prometheus recorder and return the handle that renders it.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Metric names as constants for consistency.
pub mod names {
    // HTTP metrics
    pub const HTTP_REQUESTS_TOTAL: &str = "folio_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "folio_http_request_duration_seconds";
    pub const HTTP_REQUESTS_IN_FLIGHT: &str = "folio_http_requests_in_flight";

    // Storage proxy metrics
    pub const STORAGE_OPERATIONS_TOTAL: &str = "folio_storage_operations_total";
    pub const STORAGE_BYTES_UPLOADED_TOTAL: &str = "folio_storage_bytes_uploaded_total";

    // Access control
    pub const AUTH_REJECTIONS_TOTAL: &str = "folio_auth_rejections_total";
    pub const RATE_LIMIT_HITS_TOTAL: &str = "folio_rate_limit_hits_total";
}

/// Record an HTTP request.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("path", sanitize_path(path)),
        ("status", status.to_string()),
    ];

    counter!(names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record a proxied storage operation (`put`, `get`, `delete`, `list`).
pub fn record_storage_operation(operation: &'static str, success: bool) {
    let labels = [
        ("operation", operation.to_string()),
        ("outcome", if success { "ok" } else { "error" }.to_string()),
    ];
    counter!(names::STORAGE_OPERATIONS_TOTAL, &labels).increment(1);
}

pub fn record_bytes_uploaded(bytes: usize) {
    counter!(names::STORAGE_BYTES_UPLOADED_TOTAL).increment(bytes as u64);
}

pub fn record_auth_rejection() {
    counter!(names::AUTH_REJECTIONS_TOTAL).increment(1);
}

/// Record rate limit hit.
pub fn record_rate_limit_hit(endpoint: &str) {
    let labels = [("endpoint", sanitize_path(endpoint))];
    counter!(names::RATE_LIMIT_HITS_TOTAL, &labels).increment(1);
}

static GALLERY_VIDEO_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/api/videos/[^/]+$").expect("valid regex"));

/// Routes reported under their own path label.
const KNOWN_PATHS: &[&str] = &[
    "/api/videos",
    "/api/categories",
    "/api/featured",
    "/uploader/upload",
    "/uploader/files",
    "/uploader/download",
    "/health",
    "/ready",
    "/metrics",
];

/// Collapse unbounded path segments so label cardinality stays fixed.
fn sanitize_path(path: &str) -> String {
    if KNOWN_PATHS.contains(&path) {
        return path.to_string();
    }
    if GALLERY_VIDEO_ID.is_match(path) {
        return "/api/videos/:id".to_string();
    }
    // Everything else is an object key on the proxy
    "/:key".to_string()
}

/// Metrics middleware for HTTP requests.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).increment(1.0);
    let response = next.run(request).await;
    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).decrement(1.0);

    record_http_request(
        &method,
        &path,
        response.status().as_u16(),
        start.elapsed().as_secs_f64(),
    );

    response
}
