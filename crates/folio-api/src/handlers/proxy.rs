//! Authenticated storage proxy.
//!
//! The request path (minus the leading `/`) is the object key. Responses are
//! plain text so existing clients of the proxy keep working.

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use folio_storage::{validate_key, ObjectMetadata, StorageError, StoredObject};
use tracing::{error, info};

use crate::metrics;
use crate::middleware::is_authorized;
use crate::state::AppState;

/// Fallback handler: PUT/GET/DELETE on `/{key}`.
pub async fn proxy(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if !is_authorized(&state.config, &headers) {
        metrics::record_auth_rejection();
        return (StatusCode::FORBIDDEN, "Forbidden").into_response();
    }

    if method != Method::PUT && method != Method::GET && method != Method::DELETE {
        return (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed").into_response();
    }

    let key = object_key(&uri);
    if let Err(e) = validate_key(key) {
        return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
    }

    match method {
        Method::PUT => put(&state, key, &headers, body).await,
        Method::GET => get(&state, key).await,
        _ => delete(&state, key).await,
    }
}

/// Object key addressed by a proxy request.
pub fn object_key(uri: &Uri) -> &str {
    uri.path().strip_prefix('/').unwrap_or(uri.path())
}

async fn put(state: &AppState, key: &str, headers: &HeaderMap, body: Bytes) -> Response {
    let size = body.len();
    let metadata = metadata_from_headers(headers);

    match state.storage.put_object(key, body.to_vec(), &metadata).await {
        Ok(()) => {
            metrics::record_storage_operation("put", true);
            metrics::record_bytes_uploaded(size);
            info!(key = %key, size, "Stored object");
            format!("Uploaded {} successfully!", key).into_response()
        }
        Err(e) => storage_failure("put", key, e),
    }
}

async fn get(state: &AppState, key: &str) -> Response {
    match state.storage.get_object(key).await {
        Ok(object) => {
            metrics::record_storage_operation("get", true);
            object_response(object)
        }
        Err(StorageError::NotFound(_)) => {
            metrics::record_storage_operation("get", true);
            (StatusCode::NOT_FOUND, "Not Found").into_response()
        }
        Err(e) => storage_failure("get", key, e),
    }
}

async fn delete(state: &AppState, key: &str) -> Response {
    match state.storage.delete_object(key).await {
        Ok(()) => {
            metrics::record_storage_operation("delete", true);
            info!(key = %key, "Deleted object");
            format!("Deleted {}!", key).into_response()
        }
        Err(e) => storage_failure("delete", key, e),
    }
}

fn storage_failure(operation: &'static str, key: &str, e: StorageError) -> Response {
    metrics::record_storage_operation(operation, false);
    error!(key = %key, error = %e, "Storage {} failed", operation);
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}

/// HTTP metadata to store with an uploaded object.
pub fn metadata_from_headers(headers: &HeaderMap) -> ObjectMetadata {
    let read = |name: HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    ObjectMetadata {
        content_type: read(header::CONTENT_TYPE),
        content_disposition: read(header::CONTENT_DISPOSITION),
        content_encoding: read(header::CONTENT_ENCODING),
        content_language: read(header::CONTENT_LANGUAGE),
        cache_control: read(header::CACHE_CONTROL),
    }
}

fn object_response(object: StoredObject) -> Response {
    let mut response = Response::new(Body::from(object.body));
    let headers = response.headers_mut();

    let meta = object.metadata;
    let pairs = [
        (header::CONTENT_TYPE, meta.content_type),
        (header::CONTENT_DISPOSITION, meta.content_disposition),
        (header::CONTENT_ENCODING, meta.content_encoding),
        (header::CONTENT_LANGUAGE, meta.content_language),
        (header::CACHE_CONTROL, meta.cache_control),
        (header::ETAG, object.etag),
    ];
    for (name, value) in pairs {
        if let Some(value) = value.and_then(|v| HeaderValue::from_str(&v).ok()) {
            headers.insert(name, value);
        }
    }

    response
}
