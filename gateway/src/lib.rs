//! Patient records HTTP gateway.
//!
//! Sits in front of a PostgreSQL database and exposes two operations:
//! seeding a fixed patient dataset with the writer credential tier, and
//! executing guarded read-only queries with the reader tier.

pub mod handlers;
pub mod routes;
pub mod service;
pub mod state;

use axum::middleware;
use axum::response::IntoResponse;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use common::errors::AppError;
use common::middleware::cors::{cors_middleware, CorsPolicy};
use common::middleware::request_id::request_id_middleware;

use state::AppState;

/// Builds the full router with its middleware stack.
///
/// The CORS layer is outermost so every response, including 404s and panic
/// recoveries, carries the headers.
pub fn create_router(state: AppState) -> Router {
    let cors_policy = CorsPolicy::parse(&state.config.allowed_origin);

    Router::new()
        .merge(routes::router())
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn_with_state(cors_policy, cors_middleware))
        .with_state(state)
}

/// Outermost error boundary: a panicking handler becomes a 500 JSON error
/// instead of a dropped connection.
fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> axum::response::Response {
    let detail = if let Some(message) = err.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        (*message).to_string()
    } else {
        "unexpected internal error".to_string()
    };
    tracing::error!(error = %detail, "request handler panicked");
    AppError::Internal(detail).into_response()
}
