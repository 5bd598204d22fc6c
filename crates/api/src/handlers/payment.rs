use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use beautyton_core::models::payment::{Payment, PaymentRequest, UpdatePaymentStatusRequest};
use std::sync::Arc;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn create_payment(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<PaymentRequest>,
) -> Result<(StatusCode, Json<Payment>), AppError> {
    let payment = state.usecases.payments.create_payment(payload).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

#[axum::debug_handler]
pub async fn get_payment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Payment>, AppError> {
    Ok(Json(state.usecases.payments.get_payment(id).await?))
}

#[axum::debug_handler]
pub async fn update_payment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PaymentRequest>,
) -> Result<Json<Payment>, AppError> {
    Ok(Json(state.usecases.payments.update_payment(id, payload).await?))
}

#[axum::debug_handler]
pub async fn update_status(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePaymentStatusRequest>,
) -> Result<Json<Payment>, AppError> {
    let payment = state
        .usecases
        .payments
        .update_status(id, &payload.status)
        .await?;
    Ok(Json(payment))
}
