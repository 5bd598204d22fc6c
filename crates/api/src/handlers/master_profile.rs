use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use beautyton_core::models::{
    master_profile::{MasterProfile, MasterProfileFilter, MasterProfileRequest, UpdateRatingRequest},
    pagination::{ListResponse, PageRequest},
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

/// Query string of `GET /api/master_profiles`.
#[derive(Debug, Default, Deserialize)]
pub struct MasterProfileQuery {
    pub query: Option<String>,
    pub category: Option<String>,
    pub city: Option<String>,
    pub price_from: Option<f64>,
    pub price_to: Option<f64>,
    pub rating: Option<f64>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl MasterProfileQuery {
    fn split(self) -> (MasterProfileFilter, PageRequest) {
        let filter = MasterProfileFilter {
            query: non_blank(self.query),
            category: non_blank(self.category),
            city: non_blank(self.city),
            price_from: self.price_from,
            price_to: self.price_to,
            rating: self.rating,
        };
        let page = PageRequest {
            page: self.page,
            page_size: self.page_size,
        };
        (filter, page)
    }
}

#[axum::debug_handler]
pub async fn list_profiles(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<MasterProfileQuery>,
) -> Result<Json<ListResponse<MasterProfile>>, AppError> {
    let (filter, page) = query.split();
    let profiles = state.usecases.master_profiles.list_profiles(filter, page).await?;
    Ok(Json(profiles))
}

#[axum::debug_handler]
pub async fn create_profile(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<MasterProfileRequest>,
) -> Result<(StatusCode, Json<MasterProfile>), AppError> {
    let profile = state.usecases.master_profiles.create_profile(payload).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

#[axum::debug_handler]
pub async fn get_profile(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<MasterProfile>, AppError> {
    Ok(Json(state.usecases.master_profiles.get_profile(id).await?))
}

#[axum::debug_handler]
pub async fn update_profile(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<MasterProfileRequest>,
) -> Result<Json<MasterProfile>, AppError> {
    let profile = state.usecases.master_profiles.update_profile(id, payload).await?;
    Ok(Json(profile))
}

#[axum::debug_handler]
pub async fn update_rating(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRatingRequest>,
) -> Result<Json<MasterProfile>, AppError> {
    let profile = state
        .usecases
        .master_profiles
        .update_rating(id, payload.rating)
        .await?;
    Ok(Json(profile))
}

#[axum::debug_handler]
pub async fn delete_profile(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.usecases.master_profiles.delete_profile(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_filters_are_dropped() {
        let (filter, page) = MasterProfileQuery {
            query: Some("  ".to_string()),
            city: Some(" Almaty ".to_string()),
            page: Some(2),
            ..Default::default()
        }
        .split();

        assert_eq!(filter.query, None);
        assert_eq!(filter.city.as_deref(), Some("Almaty"));
        assert_eq!(page.page, Some(2));
        assert_eq!(page.page_size, None);
    }
}
