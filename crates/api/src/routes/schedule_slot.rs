use axum::{
    routing::get,
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/schedule_slots",
            get(handlers::schedule_slot::list_slots).post(handlers::schedule_slot::create_slot),
        )
        .route(
            "/api/schedule_slots/:id",
            get(handlers::schedule_slot::get_slot)
                .put(handlers::schedule_slot::update_slot)
                .delete(handlers::schedule_slot::delete_slot),
        )
}
