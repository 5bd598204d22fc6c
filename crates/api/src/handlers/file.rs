//! Raw file upload and download.
//!
//! Uploads take the request body as-is; the MIME type comes from
//! `Content-Type` and the optional display name from `X-File-Name`.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use beautyton_core::models::file::StoredFile;
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, ApiState};

pub const FILE_NAME_HEADER: &str = "x-file-name";

/// Display name and MIME type of an upload, taken from its headers.
pub(crate) fn upload_metadata(headers: &HeaderMap) -> (Option<String>, String) {
    let text = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.trim().to_string())
    };

    let name = text(FILE_NAME_HEADER).filter(|n| !n.is_empty());
    let mime_type = text(header::CONTENT_TYPE.as_str()).unwrap_or_default();
    (name, mime_type)
}

#[axum::debug_handler]
pub async fn upload_file(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<StoredFile>), AppError> {
    let (name, mime_type) = upload_metadata(&headers);
    let file = state
        .usecases
        .files
        .upload(name, &mime_type, body.to_vec())
        .await?;
    Ok((StatusCode::CREATED, Json(file)))
}

#[axum::debug_handler]
pub async fn download_file(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let (file, content) = state.usecases.files.get(&id).await?;
    Ok(([(header::CONTENT_TYPE, file.mime_type)], content))
}
