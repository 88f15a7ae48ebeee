//! Query result models.

use serde::Serialize;

/// One result row: column name to JSON value, in the engine's column order.
pub type RowObject = serde_json::Map<String, serde_json::Value>;

/// Result of a guarded read-only query.
#[derive(Debug, Serialize)]
pub struct QueryOutcome {
    /// Result rows, in the order the engine returned them.
    pub rows: Vec<RowObject>,
}
