//! API response wrapper types.
//!
//! Every JSON body the gateway emits is an object with an `ok` boolean
//! discriminant. Success payloads flatten into the object; failures carry a
//! single `error` string.

use serde::Serialize;

/// Standard API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub ok: bool,

    /// Success payload, inlined into the response object.
    #[serde(flatten)]
    pub data: Option<T>,

    /// Error message (present on failure).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response with the given payload.
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    /// Creates an error response.
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SeedOutcome;
    use serde_json::json;

    #[test]
    fn test_success_payload_is_flattened() {
        let body = ApiResponse::ok(SeedOutcome { affected_count: 4 });
        let rendered = serde_json::to_value(&body).unwrap();
        assert_eq!(rendered, json!({"ok": true, "affectedCount": 4}));
    }

    #[test]
    fn test_error_shape() {
        let body = ApiResponse::err("not found");
        let rendered = serde_json::to_value(&body).unwrap();
        assert_eq!(rendered, json!({"ok": false, "error": "not found"}));
    }
}
