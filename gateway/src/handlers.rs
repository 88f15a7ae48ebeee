//! Request handlers.

use axum::extract::{Path, State};
use axum::Json;

use common::errors::{AppError, AppResult};
use common::models::{QueryOutcome, SeedOutcome};
use common::response::ApiResponse;
use common::utils::SqlGuard;

use crate::state::AppState;

/// Plain-text health probe.
pub async fn health_check() -> &'static str {
    "patient gateway is running"
}

/// Ensures the patient table exists and appends the fixed seed rows.
///
/// Runs with the writer tier. Calling it again appends another copy of the
/// set; the reported count is whatever the engine returns.
pub async fn seed_patients(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<SeedOutcome>>> {
    let outcome = state.data_access.seed_fixed_rows().await?;
    Ok(Json(ApiResponse::ok(outcome)))
}

/// Executes a client-supplied statement with the reader tier.
///
/// The wildcard tail arrives percent-decoded from the path extractor, so the
/// guard sees the raw SQL exactly once.
pub async fn run_sql(
    State(state): State<AppState>,
    Path(sql): Path<String>,
) -> AppResult<Json<ApiResponse<QueryOutcome>>> {
    if !SqlGuard::is_read_only(&sql) {
        return Err(AppError::UnsafeSql("only read queries permitted".into()));
    }
    let outcome = state.data_access.run_query(&sql).await?;
    Ok(Json(ApiResponse::ok(outcome)))
}

/// Fallback for unmatched routes.
pub async fn not_found() -> AppError {
    AppError::NotFound("not found".into())
}
