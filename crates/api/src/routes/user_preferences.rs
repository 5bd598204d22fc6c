use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/user_preferences", post(handlers::user_preferences::create_user_preferences))
        .route(
            "/api/user_preferences/:id",
            get(handlers::user_preferences::get_user_preferences)
                .put(handlers::user_preferences::update_user_preferences)
                .delete(handlers::user_preferences::delete_user_preferences),
        )
}
