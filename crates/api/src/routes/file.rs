use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/files", post(handlers::file::upload_file))
        .route("/api/files/:id", get(handlers::file::download_file))
}
