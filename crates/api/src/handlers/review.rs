use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use beautyton_core::models::review::{Review, ReviewRequest};
use std::sync::Arc;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn create_review(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<ReviewRequest>,
) -> Result<(StatusCode, Json<Review>), AppError> {
    let review = state.usecases.reviews.create_review(payload).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

#[axum::debug_handler]
pub async fn get_review(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Review>, AppError> {
    Ok(Json(state.usecases.reviews.get_review(id).await?))
}

#[axum::debug_handler]
pub async fn update_review(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReviewRequest>,
) -> Result<Json<Review>, AppError> {
    Ok(Json(state.usecases.reviews.update_review(id, payload).await?))
}

#[axum::debug_handler]
pub async fn delete_review(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.usecases.reviews.delete_review(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
