use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/reviews", post(handlers::review::create_review))
        .route(
            "/api/reviews/:id",
            get(handlers::review::get_review)
                .put(handlers::review::update_review)
                .delete(handlers::review::delete_review),
        )
}
