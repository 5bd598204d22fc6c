//! Schedule slot endpoints. Writes carry the caller identity so the slot
//! usecase can consult its access policy.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use beautyton_core::{
    errors::MarketError,
    models::schedule_slot::{ScheduleSlot, ScheduleSlotRequest},
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    middleware::{actor::CurrentActor, error_handling::AppError},
    ApiState,
};

#[derive(Debug, Deserialize)]
pub struct SlotListQuery {
    pub master_id: Option<Uuid>,
}

#[axum::debug_handler]
pub async fn list_slots(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<SlotListQuery>,
) -> Result<Json<Vec<ScheduleSlot>>, AppError> {
    let master_id = query
        .master_id
        .ok_or_else(|| MarketError::validation("master_id is required"))?;
    Ok(Json(state.usecases.schedule_slots.list_slots(master_id).await?))
}

#[axum::debug_handler]
pub async fn create_slot(
    State(state): State<Arc<ApiState>>,
    CurrentActor(actor): CurrentActor,
    Json(payload): Json<ScheduleSlotRequest>,
) -> Result<(StatusCode, Json<ScheduleSlot>), AppError> {
    let slot = state
        .usecases
        .schedule_slots
        .create_slot(&actor, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(slot)))
}

#[axum::debug_handler]
pub async fn get_slot(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ScheduleSlot>, AppError> {
    Ok(Json(state.usecases.schedule_slots.get_slot(id).await?))
}

#[axum::debug_handler]
pub async fn update_slot(
    State(state): State<Arc<ApiState>>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<Uuid>,
    Json(payload): Json<ScheduleSlotRequest>,
) -> Result<Json<ScheduleSlot>, AppError> {
    let slot = state
        .usecases
        .schedule_slots
        .update_slot(&actor, id, payload)
        .await?;
    Ok(Json(slot))
}

#[axum::debug_handler]
pub async fn delete_slot(
    State(state): State<Arc<ApiState>>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.usecases.schedule_slots.delete_slot(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
