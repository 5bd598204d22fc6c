use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/master_profiles",
            get(handlers::master_profile::list_profiles).post(handlers::master_profile::create_profile),
        )
        .route(
            "/api/master_profiles/:id",
            get(handlers::master_profile::get_profile)
                .put(handlers::master_profile::update_profile)
                .delete(handlers::master_profile::delete_profile),
        )
        .route(
            "/api/master_profiles/:id/rating",
            put(handlers::master_profile::update_rating),
        )
}
