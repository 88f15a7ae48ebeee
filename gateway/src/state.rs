//! Application state for the gateway.

use std::sync::Arc;

use common::config::AppConfig;

use crate::service::DataAccess;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub data_access: Arc<dyn DataAccess>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(config: AppConfig, data_access: Arc<dyn DataAccess>) -> Self {
        Self {
            config,
            data_access,
        }
    }
}
