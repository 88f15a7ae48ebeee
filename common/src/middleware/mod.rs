//! HTTP middleware for the gateway.

pub mod cors;
pub mod request_id;

// Re-export commonly used types
pub use cors::{cors_middleware, CorsPolicy};
pub use request_id::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
