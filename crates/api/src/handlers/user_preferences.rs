use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use beautyton_core::models::user_preferences::{UserPreferences, UserPreferencesRequest};
use std::sync::Arc;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn create_user_preferences(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<UserPreferencesRequest>,
) -> Result<(StatusCode, Json<UserPreferences>), AppError> {
    let preferences = state.usecases.user_preferences.create_user_preferences(payload).await?;
    Ok((StatusCode::CREATED, Json(preferences)))
}

#[axum::debug_handler]
pub async fn get_user_preferences(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserPreferences>, AppError> {
    Ok(Json(state.usecases.user_preferences.get_user_preferences(id).await?))
}

#[axum::debug_handler]
pub async fn update_user_preferences(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UserPreferencesRequest>,
) -> Result<Json<UserPreferences>, AppError> {
    let preferences = state.usecases.user_preferences.update_user_preferences(id, payload).await?;
    Ok(Json(preferences))
}

#[axum::debug_handler]
pub async fn delete_user_preferences(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.usecases.user_preferences.delete_user_preferences(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
