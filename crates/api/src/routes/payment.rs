use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/payments", post(handlers::payment::create_payment))
        .route(
            "/api/payments/:id",
            get(handlers::payment::get_payment).put(handlers::payment::update_payment),
        )
        .route("/api/payments/:id/status", put(handlers::payment::update_status))
}
