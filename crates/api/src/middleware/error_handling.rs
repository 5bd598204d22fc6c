//! # Error Handling Middleware
//!
//! Maps [`MarketError`] values to HTTP status codes and JSON error bodies of
//! the form `{"error": "<message>"}`, so every handler reports failures the
//! same way.
//!
//! Store and internal failures are logged and answered with a generic message;
//! their details never reach the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use beautyton_core::errors::MarketError;
use serde_json::json;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use beautyton_api::middleware::error_handling::AppError;
/// use beautyton_core::errors::MarketError;
///
/// async fn handler(found: bool) -> Result<Json<&'static str>, AppError> {
///     if !found {
///         return Err(AppError(MarketError::not_found("user not found")));
///     }
///     Ok(Json("ok"))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub MarketError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            MarketError::NotFound(_) => StatusCode::NOT_FOUND,
            MarketError::Validation(_) => StatusCode::BAD_REQUEST,
            MarketError::SlotOverlap => StatusCode::BAD_REQUEST,
            MarketError::Conflict(_) => StatusCode::CONFLICT,
            MarketError::Unauthorized => StatusCode::UNAUTHORIZED,
            MarketError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            MarketError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The client-facing message: the bare domain message for 4xx answers.
    pub fn message(&self) -> String {
        match &self.0 {
            MarketError::NotFound(msg)
            | MarketError::Validation(msg)
            | MarketError::Conflict(msg) => msg.clone(),
            MarketError::SlotOverlap | MarketError::Unauthorized => self.0.to_string(),
            MarketError::Database(_) | MarketError::Internal(_) => {
                "internal server error".to_string()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {:?}", self.0);
        }

        let body = Json(json!({ "error": self.message() }));
        (status, body).into_response()
    }
}

/// Allows `?` on `MarketResult` inside handlers.
impl From<MarketError> for AppError {
    fn from(err: MarketError) -> Self {
        AppError(err)
    }
}

/// Wraps a bare report as a store failure.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(MarketError::Database(err))
    }
}

/// Maps a MarketError to an HTTP response
pub fn map_error(err: MarketError) -> Response {
    AppError(err).into_response()
}
