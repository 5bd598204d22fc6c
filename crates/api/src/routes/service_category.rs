use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/service_categories",
            post(handlers::service_category::create_category),
        )
        .route(
            "/api/service_categories/:id",
            get(handlers::service_category::get_category)
                .put(handlers::service_category::update_category)
                .delete(handlers::service_category::delete_category),
        )
}
