//! Fake news prediction server
//!
//! Serves the loaded classifier over HTTP:
//! - `GET /` reports that the API is up
//! - `POST /predict` classifies a title and text

mod api;
mod error;
mod handlers;
mod state;

pub use api::create_router;
pub use error::ServerError;
pub use handlers::{PredictResponse, StatusResponse, STATUS_MESSAGE};
pub use state::AppState;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info};

use crate::inference::{InferenceConfig, PredictionService};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub inference: InferenceConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let inference = match std::env::var("MODEL_PATH") {
            Ok(path) if !path.is_empty() => InferenceConfig::new(path),
            _ => InferenceConfig::default(),
        };

        Self {
            host: std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            inference,
        }
    }
}

/// Load the model and build the shared state.
///
/// Any failure here is fatal: the server never starts without a model.
pub fn build_state(config: ServerConfig) -> anyhow::Result<Arc<AppState>> {
    let service = PredictionService::load(&config.inference).with_context(|| {
        format!(
            "failed to load model from {}",
            config.inference.model_path.display()
        )
    })?;
    Ok(Arc::new(AppState::new(config, service)))
}

/// Start the server with the given configuration
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let state = build_state(config.clone())?;
    let app = create_router(Arc::clone(&state));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", config.host, config.port))?;
    info!(
        address = %addr,
        variant = %state.service.variant(),
        capability = %state.service.capability(),
        started_at = %state.started_at.to_rfc3339(),
        "Fake News API starting"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(address = %addr, pid = std::process::id(), "Server listening and ready to accept connections");

    let started_at = state.started_at;
    let shutdown_signal = async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install CTRL+C signal handler");
            return;
        }
        let uptime = chrono::Utc::now().signed_duration_since(started_at);
        info!(
            uptime_secs = uptime.num_seconds(),
            "Shutdown signal received, stopping server gracefully"
        );
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shut down cleanly");
    Ok(())
}
