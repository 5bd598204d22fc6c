use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use beautyton_core::models::my_master::{MyMaster, MyMasterRequest};
use std::sync::Arc;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn create_my_master(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<MyMasterRequest>,
) -> Result<(StatusCode, Json<MyMaster>), AppError> {
    let entry = state.usecases.my_masters.create_my_master(payload).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

#[axum::debug_handler]
pub async fn get_my_master(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<MyMaster>, AppError> {
    Ok(Json(state.usecases.my_masters.get_my_master(id).await?))
}

#[axum::debug_handler]
pub async fn update_my_master(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<MyMasterRequest>,
) -> Result<Json<MyMaster>, AppError> {
    let entry = state.usecases.my_masters.update_my_master(id, payload).await?;
    Ok(Json(entry))
}

#[axum::debug_handler]
pub async fn delete_my_master(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.usecases.my_masters.delete_my_master(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
