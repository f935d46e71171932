//! Fake News API - Main Entry Point
//!
//! Serves the classifier over HTTP by default, with offline `predict` and
//! `info` commands.

use clap::Parser;
use fake_news_classifier::cli::{cmd_info, cmd_predict, cmd_serve, Cli, Commands};
use fake_news_classifier::server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fake_news_classifier=info,tower_http=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve { host, port, model }) => {
            cmd_serve(&host, port, model.as_deref()).await?;
        }
        Some(Commands::Predict { title, text, model }) => {
            cmd_predict(&title, &text, model.as_deref())?;
        }
        Some(Commands::Info { model }) => {
            cmd_info(model.as_deref())?;
        }
        None => {
            let config = ServerConfig::default();
            cmd_serve(&config.host, config.port, Some(config.inference.model_path.as_path())).await?;
        }
    }

    Ok(())
}
