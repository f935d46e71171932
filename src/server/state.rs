//! Application state management

use std::sync::Arc;

use crate::inference::PredictionService;

use super::ServerConfig;

/// Application state shared across handlers
///
/// Everything here is read-only after start-up, so handlers share it
/// without locks.
#[derive(Debug)]
pub struct AppState {
    pub config: ServerConfig,
    pub service: Arc<PredictionService>,
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    pub fn new(config: ServerConfig, service: PredictionService) -> Self {
        Self {
            config,
            service: Arc::new(service),
            started_at: chrono::Utc::now(),
        }
    }
}
