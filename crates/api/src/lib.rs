//! # BeautyTON API
//!
//! The API crate provides the web server for the BeautyTON booking
//! marketplace. It exposes JSON endpoints for users, master profiles,
//! services, bookings, schedule slots, reviews, payments, locations and
//! uploaded files.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Translate HTTP requests into usecase calls
//! - **Middleware**: Caller identification and error mapping
//! - **Config**: Handle environment and application configuration
//!
//! Business rules live in `beautyton-core`; handlers only decode requests and
//! encode results.

/// Configuration module for API settings
pub mod config;
/// Request handlers, one module per resource
pub mod handlers;
/// Middleware for caller identification and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    error_handling::HandleErrorLayer,
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    BoxError, Json, Router,
};
use beautyton_core::{
    access::{AccessPolicy, AllowAll, MasterOwnership},
    repositories::Repositories,
    usecases::Usecases,
};
use eyre::Result;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use config::{ApiConfig, SlotAccessPolicy};

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```ignore
/// let state = Arc::new(ApiState::new(&repos, Arc::new(AllowAll)));
/// let app = build_router(state);
/// ```
pub struct ApiState {
    /// Every usecase, wired to the configured stores
    pub usecases: Usecases,
}

impl ApiState {
    pub fn new(repos: &Repositories, access: Arc<dyn AccessPolicy>) -> Self {
        Self {
            usecases: Usecases::new(repos, access),
        }
    }
}

/// Builds the access policy named in the configuration.
pub fn access_policy(policy: SlotAccessPolicy, repos: &Repositories) -> Arc<dyn AccessPolicy> {
    match policy {
        SlotAccessPolicy::Allow => Arc::new(AllowAll),
        SlotAccessPolicy::Owner => Arc::new(MasterOwnership::new(repos.master_profiles.clone())),
    }
}

/// Assembles every route with request tracing, without server-level layers.
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Marketplace resources
        .merge(routes::user::routes())
        .merge(routes::user_preferences::routes())
        .merge(routes::master_profile::routes())
        .merge(routes::service::routes())
        .merge(routes::service_category::routes())
        .merge(routes::booking::routes())
        .merge(routes::schedule_slot::routes())
        .merge(routes::review::routes())
        .merge(routes::payment::routes())
        .merge(routes::subscription::routes())
        .merge(routes::my_master::routes())
        .merge(routes::location::routes())
        .merge(routes::file::routes())
        // Attach shared state to all routes
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            HeaderName::from_static(middleware::actor::USER_ID_HEADER),
            HeaderName::from_static(handlers::file::FILE_NAME_HEADER),
        ])
        .allow_origin(origins)
        .allow_credentials(true)
}

async fn handle_timeout(err: BoxError) -> (StatusCode, Json<Value>) {
    if err.is::<tower::timeout::error::Elapsed>() {
        (
            StatusCode::REQUEST_TIMEOUT,
            Json(json!({ "error": "request timed out" })),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "internal server error" })),
        )
    }
}

/// Installs the global log subscriber at `level`.
pub fn init_tracing(level: Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Starts the API server with the provided configuration and state
///
/// Applies CORS and the request timeout, then serves until the listener fails.
pub async fn start_server(config: ApiConfig, state: Arc<ApiState>) -> Result<()> {
    let app = build_router(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)),
        None => app,
    };

    // Add request timeout middleware
    let app = app.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_timeout))
            .timeout(Duration::from_secs(config.request_timeout)),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(
        "Server listening on http://{} (slot access policy: {:?})",
        addr, config.slot_access_policy
    );
    axum::serve(listener, app).await?;

    Ok(())
}
