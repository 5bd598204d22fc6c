//! Countries and cities.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use beautyton_core::models::{
    location::{City, CityRequest, Country, CountryRequest},
    pagination::{ListResponse, PageRequest},
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn create_country(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CountryRequest>,
) -> Result<(StatusCode, Json<Country>), AppError> {
    let country = state.usecases.countries.create_country(payload).await?;
    Ok((StatusCode::CREATED, Json(country)))
}

#[axum::debug_handler]
pub async fn get_country(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Country>, AppError> {
    Ok(Json(state.usecases.countries.get_country(id).await?))
}

#[axum::debug_handler]
pub async fn update_country(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CountryRequest>,
) -> Result<Json<Country>, AppError> {
    Ok(Json(state.usecases.countries.update_country(id, payload).await?))
}

#[axum::debug_handler]
pub async fn delete_country(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.usecases.countries.delete_country(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Query string of `GET /api/cities`.
#[derive(Debug, Default, Deserialize)]
pub struct CityListQuery {
    pub name: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

#[axum::debug_handler]
pub async fn list_cities(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<CityListQuery>,
) -> Result<Json<ListResponse<City>>, AppError> {
    let page = PageRequest {
        page: query.page,
        page_size: query.page_size,
    };
    Ok(Json(state.usecases.cities.list_cities(query.name, page).await?))
}

#[axum::debug_handler]
pub async fn create_city(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CityRequest>,
) -> Result<(StatusCode, Json<City>), AppError> {
    let city = state.usecases.cities.create_city(payload).await?;
    Ok((StatusCode::CREATED, Json(city)))
}

#[axum::debug_handler]
pub async fn get_city(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<City>, AppError> {
    Ok(Json(state.usecases.cities.get_city(id).await?))
}

#[axum::debug_handler]
pub async fn update_city(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CityRequest>,
) -> Result<Json<City>, AppError> {
    Ok(Json(state.usecases.cities.update_city(id, payload).await?))
}

#[axum::debug_handler]
pub async fn delete_city(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.usecases.cities.delete_city(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
