use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/subscriptions", post(handlers::subscription::create_subscription))
        .route(
            "/api/subscriptions/:id",
            get(handlers::subscription::get_subscription)
                .put(handlers::subscription::update_subscription)
                .delete(handlers::subscription::delete_subscription),
        )
}
