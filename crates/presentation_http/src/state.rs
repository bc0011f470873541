//! Application state shared across handlers

use std::sync::Arc;

use application::{ClimateService, DatabaseHealthPort};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Climate query service with its startup context
    pub climate_service: Arc<ClimateService>,
    /// Dataset probe for the readiness endpoint
    pub database_health: Arc<dyn DatabaseHealthPort>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("climate_service", &self.climate_service)
            .field("database_health", &"<dyn DatabaseHealthPort>")
            .finish()
    }
}
