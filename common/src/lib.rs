//! Shared modules for the patient gateway.
//!
//! Holds everything the service crate builds on: configuration and
//! credential profiles, error types, the API response wrapper, data models,
//! the SQL read-only guard, and HTTP middleware.

pub mod config;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod response;
pub mod utils;
