//! Uploader routes: multipart upload, listing, download and delete.

use axum::body::Body;
use axum::extract::{Multipart, Query, State};
use axum::http::{header, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::Json;
use folio_storage::{validate_key, ObjectInfo, ObjectMetadata};
use serde::Deserialize;
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::state::AppState;

/// Content types accepted by the upload form.
pub const ALLOWED_UPLOAD_TYPES: &[&str] = &["video/mp4", "image/png"];

/// Objects returned by the listing.
pub const LIST_LIMIT: usize = 100;

/// Store the multipart field `file` under its original file name.
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<String> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| ApiError::bad_request("Missing file name"))?;
        let content_type = field.content_type().unwrap_or_default().to_string();

        if !ALLOWED_UPLOAD_TYPES.contains(&content_type.as_str()) {
            return Err(ApiError::UnsupportedMediaType(
                "Only .mp4 and .png files are allowed!".to_string(),
            ));
        }
        validate_key(&file_name)?;

        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(e.to_string()))?;
        let size = data.len();

        let metadata = ObjectMetadata::with_content_type(content_type);
        let result = state.storage.put_object(&file_name, data.to_vec(), &metadata).await;
        metrics::record_storage_operation("put", result.is_ok());
        result?;
        metrics::record_bytes_uploaded(size);

        info!(key = %file_name, size, "Uploaded via form");
        return Ok(format!("Uploaded {}", file_name));
    }

    Err(ApiError::bad_request("Missing file"))
}

/// First objects in the bucket.
pub async fn list_files(State(state): State<AppState>) -> ApiResult<Json<Vec<ObjectInfo>>> {
    let result = state.storage.list_objects("", Some(LIST_LIMIT)).await;
    metrics::record_storage_operation("list", result.is_ok());
    Ok(Json(result?))
}

#[derive(Debug, Deserialize)]
pub struct KeyQuery {
    pub key: Option<String>,
}

/// Download an object as an attachment.
pub async fn download_file(
    State(state): State<AppState>,
    Query(query): Query<KeyQuery>,
) -> ApiResult<Response> {
    let key = query
        .key
        .filter(|k| !k.is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing key"))?;

    let result = state.storage.get_object(&key).await;
    metrics::record_storage_operation("get", result.is_ok());
    let object = result?;

    let content_type = object
        .metadata
        .content_type
        .unwrap_or_else(|| "application/octet-stream".to_string());
    let disposition = format!("attachment; filename=\"{}\"", key.replace('"', ""));

    let mut response = Response::new(Body::from(object.body));
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&content_type) {
        headers.insert(header::CONTENT_TYPE, value);
    }
    if let Ok(value) = HeaderValue::from_str(&disposition) {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }

    Ok(response.into_response())
}

#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    pub key: Option<String>,
}

/// Delete the object named in the JSON body.
pub async fn delete_file(
    State(state): State<AppState>,
    Json(request): Json<DeleteRequest>,
) -> ApiResult<String> {
    let key = request
        .key
        .filter(|k| !k.is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing file key"))?;

    let result = state.storage.delete_object(&key).await;
    metrics::record_storage_operation("delete", result.is_ok());
    result?;

    info!(key = %key, "Deleted via uploader");
    Ok(format!("Deleted {}", key))
}
