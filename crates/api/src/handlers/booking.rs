use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use beautyton_core::models::booking::{Booking, BookingRequest, UpdateBookingStatusRequest};
use std::sync::Arc;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<BookingRequest>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let booking = state.usecases.bookings.create_booking(payload).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

#[axum::debug_handler]
pub async fn get_booking(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, AppError> {
    Ok(Json(state.usecases.bookings.get_booking(id).await?))
}

#[axum::debug_handler]
pub async fn update_booking(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<BookingRequest>,
) -> Result<Json<Booking>, AppError> {
    Ok(Json(state.usecases.bookings.update_booking(id, payload).await?))
}

#[axum::debug_handler]
pub async fn update_status(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBookingStatusRequest>,
) -> Result<Json<Booking>, AppError> {
    let booking = state
        .usecases
        .bookings
        .update_status(id, &payload.status)
        .await?;
    Ok(Json(booking))
}

#[axum::debug_handler]
pub async fn delete_booking(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.usecases.bookings.delete_booking(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
