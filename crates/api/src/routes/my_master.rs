use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/my_masters", post(handlers::my_master::create_my_master))
        .route(
            "/api/my_masters/:id",
            get(handlers::my_master::get_my_master)
                .put(handlers::my_master::update_my_master)
                .delete(handlers::my_master::delete_my_master),
        )
}
