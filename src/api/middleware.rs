//! API Middleware
//!
//! Operation context extraction, request logging and CORS.

use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;

use crate::config::Config;
use crate::domain::OperationContext;

/// Header naming the organizer making the request
pub const REQUEST_USER_HEADER: &str = "x-request-user-id";

/// Request id header, set by `SetRequestIdLayer`
pub const REQUEST_ID_HEADER: &str = "x-request-id";

// =========================================================================
// Operation context
// =========================================================================

/// Build the `OperationContext` for the request.
///
/// The organizer id is taken at face value; identity is verified by
/// whatever sits in front of this service.
pub async fn context_middleware(
    headers: HeaderMap,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let mut context = OperationContext::new();

    if let Some(user_id_str) = headers.get(REQUEST_USER_HEADER).and_then(|v| v.to_str().ok()) {
        match Uuid::parse_str(user_id_str) {
            Ok(actor_id) => context = context.with_actor(actor_id),
            Err(_) => {
                return Err((
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "Invalid X-Request-User-Id header format",
                        "error_code": "invalid_user_id"
                    })),
                )
                    .into_response());
            }
        }
    }

    if let Some(request_id) = request_id(&headers) {
        context = context.with_correlation_id(request_id);
    }
    context.ensure_correlation_id();

    request.extensions_mut().insert(context);

    Ok(next.run(request).await)
}

/// Drop a client `x-request-id` that is not a UUID, so `SetRequestIdLayer`
/// generates one and every layer sees the same id.
pub async fn discard_foreign_request_id(mut request: Request<Body>) -> Request<Body> {
    if request.headers().contains_key(REQUEST_ID_HEADER) && request_id(request.headers()).is_none() {
        request.headers_mut().remove(REQUEST_ID_HEADER);
    }
    request
}

fn request_id(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
}

// =========================================================================
// Request logging
// =========================================================================

/// Headers that should be masked in logs
const SENSITIVE_HEADERS: &[&str] = &["x-api-key", "authorization", "cookie", "set-cookie"];

/// Mask sensitive headers for logging
pub fn mask_headers_for_logging(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let name_lower = name.as_str().to_lowercase();
            let masked_value = if SENSITIVE_HEADERS.contains(&name_lower.as_str()) {
                "[REDACTED]".to_string()
            } else {
                value.to_str().unwrap_or("[invalid utf8]").to_string()
            };
            (name.to_string(), masked_value)
        })
        .collect()
}

/// Request logging middleware
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let headers = mask_headers_for_logging(request.headers());
    let correlation_id = request_id(request.headers());

    let start = std::time::Instant::now();

    tracing::info!(
        method = %method,
        uri = %uri,
        correlation_id = ?correlation_id,
        headers = ?headers,
        "Incoming request"
    );

    let response = next.run(request).await;

    tracing::info!(
        method = %method,
        uri = %uri,
        status = %response.status(),
        duration_ms = %start.elapsed().as_millis(),
        correlation_id = ?correlation_id,
        "Request completed"
    );

    response
}

// =========================================================================
// CORS
// =========================================================================

/// Browser access for the dashboard front end.
///
/// Development allows any origin; production allows only
/// `CORS_ALLOWED_ORIGIN`, or no cross-origin access when it is unset.
pub fn cors_layer(config: &Config) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if !config.is_production() {
        return base.allow_origin(Any);
    }

    match config
        .cors_allowed_origin
        .as_deref()
        .and_then(|origin| HeaderValue::from_str(origin).ok())
    {
        Some(origin) => base.allow_origin(origin),
        None => {
            tracing::warn!("CORS_ALLOWED_ORIGIN not set; cross-origin requests will be refused");
            base
        }
    }
}
