//! API module
//!
//! HTTP API endpoints, middleware and the navigation shell.

pub mod middleware;
pub mod routes;
pub mod shell;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware as axum_middleware,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::store::ShgStore;
use crate::views::ViewSettings;

pub use routes::create_router;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ShgStore>,
    pub settings: ViewSettings,
}

impl AppState {
    pub fn new(store: Arc<dyn ShgStore>, settings: ViewSettings) -> Self {
        Self { store, settings }
    }
}

/// Build the application router
pub fn build_app(state: AppState) -> Router {
    // Layers run in reverse order: logging -> context -> handler
    let api_routes = create_router()
        .layer(axum_middleware::from_fn(middleware::context_middleware))
        .layer(axum_middleware::from_fn(middleware::logging_middleware));

    Router::new()
        // Health check
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes)
        .fallback(not_found)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(axum_middleware::map_request(middleware::discard_foreign_request_id))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not found",
            "error_code": "not_found"
        })),
    )
}
