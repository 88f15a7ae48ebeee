//! Application error types.
//!
//! Every fallible path in the gateway funnels into [`AppError`], which knows
//! how to render itself as the `{ok:false, error}` JSON body with the right
//! status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::response::ApiResponse;

/// Result alias used throughout the gateway.
pub type AppResult<T> = Result<T, AppError>;

/// Application error.
#[derive(Debug, Error)]
pub enum AppError {
    /// Client-supplied SQL failed the read-only guard.
    #[error("{0}")]
    UnsafeSql(String),

    /// Could not establish a database connection.
    #[error("{0}")]
    DatabaseConnection(String),

    /// A statement failed while executing.
    #[error("{0}")]
    DatabaseQuery(String),

    /// No route matched the request.
    #[error("{0}")]
    NotFound(String),

    /// Invalid or incomplete configuration. Fatal at startup.
    #[error("{0}")]
    Config(String),

    /// Anything that escaped the layers above.
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// Maps the error to its HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::UnsafeSql(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseConnection(_)
            | AppError::DatabaseQuery(_)
            | AppError::Config(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(ApiResponse::err(self.to_string()))).into_response()
    }
}
