use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use beautyton_core::models::subscription::{Subscription, SubscriptionRequest};
use std::sync::Arc;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn create_subscription(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<SubscriptionRequest>,
) -> Result<(StatusCode, Json<Subscription>), AppError> {
    let subscription = state.usecases.subscriptions.create_subscription(payload).await?;
    Ok((StatusCode::CREATED, Json(subscription)))
}

#[axum::debug_handler]
pub async fn get_subscription(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Subscription>, AppError> {
    Ok(Json(state.usecases.subscriptions.get_subscription(id).await?))
}

#[axum::debug_handler]
pub async fn update_subscription(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SubscriptionRequest>,
) -> Result<Json<Subscription>, AppError> {
    let subscription = state.usecases.subscriptions.update_subscription(id, payload).await?;
    Ok(Json(subscription))
}

#[axum::debug_handler]
pub async fn delete_subscription(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.usecases.subscriptions.delete_subscription(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
