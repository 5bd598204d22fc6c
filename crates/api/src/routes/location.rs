use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/countries", post(handlers::location::create_country))
        .route(
            "/api/countries/:id",
            get(handlers::location::get_country)
                .put(handlers::location::update_country)
                .delete(handlers::location::delete_country),
        )
        .route(
            "/api/cities",
            get(handlers::location::list_cities).post(handlers::location::create_city),
        )
        .route(
            "/api/cities/:id",
            get(handlers::location::get_city)
                .put(handlers::location::update_city)
                .delete(handlers::location::delete_city),
        )
}
