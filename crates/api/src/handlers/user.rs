use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use beautyton_core::models::user::{User, UserRequest};
use std::sync::Arc;
use uuid::Uuid;

use super::file::upload_metadata;
use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn create_user(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<UserRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = state.usecases.users.create_user(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[axum::debug_handler]
pub async fn get_user(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    Ok(Json(state.usecases.users.get_user(id).await?))
}

#[axum::debug_handler]
pub async fn update_user(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UserRequest>,
) -> Result<Json<User>, AppError> {
    Ok(Json(state.usecases.users.update_user(id, payload).await?))
}

#[axum::debug_handler]
pub async fn delete_user(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.usecases.users.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Stores the raw request body as the user's photo.
#[axum::debug_handler]
pub async fn upload_photo(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<User>, AppError> {
    let (name, mime_type) = upload_metadata(&headers);
    let user = state
        .usecases
        .users
        .upload_photo(id, name, &mime_type, body.to_vec())
        .await?;
    Ok(Json(user))
}
