use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use beautyton_core::models::service::{ServiceCategory, ServiceCategoryRequest};
use std::sync::Arc;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn create_category(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<ServiceCategoryRequest>,
) -> Result<(StatusCode, Json<ServiceCategory>), AppError> {
    let category = state.usecases.service_categories.create_category(payload).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

#[axum::debug_handler]
pub async fn get_category(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ServiceCategory>, AppError> {
    Ok(Json(state.usecases.service_categories.get_category(id).await?))
}

#[axum::debug_handler]
pub async fn update_category(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ServiceCategoryRequest>,
) -> Result<Json<ServiceCategory>, AppError> {
    let category = state
        .usecases
        .service_categories
        .update_category(id, payload)
        .await?;
    Ok(Json(category))
}

#[axum::debug_handler]
pub async fn delete_category(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.usecases.service_categories.delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
