//! Route table.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

/// The fixed dispatch table. Anything that does not match falls through to
/// the JSON 404 handler.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::health_check))
        .route("/insert", post(handlers::seed_patients))
        .route("/api/v1/sql/{*sql}", get(handlers::run_sql))
        .fallback(handlers::not_found)
}
