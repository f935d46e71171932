//! Fake News CLI Module
//!
//! Command-line interface for serving the API and running offline predictions.

use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::export::ModelArtifact;
use crate::inference::{ArticleInput, InferenceConfig, Prediction, PredictionService};
use crate::server::{run_server, PredictResponse, ServerConfig};

// ─── Styling helpers ───────────────────────────────────────────────────────────

const W: usize = 58; // box inner width

fn dim(s: &str) -> ColoredString   { s.truecolor(100, 100, 100) }
fn muted(s: &str) -> ColoredString  { s.truecolor(140, 140, 140) }
fn ok(s: &str) -> ColoredString     { s.truecolor(100, 210, 120) }

fn line_box_top()    { println!("  {}", dim("┌─────────────────────────────────────────────────────────┐")); }
fn line_box_bottom() { println!("  {}", dim("└─────────────────────────────────────────────────────────┘")); }
fn line_box_sep()    { println!("  {}", dim("├─────────────────────────────────────────────────────────┤")); }

fn line_box(content: &str) {
    let visible_len = strip_ansi(content).chars().count();
    let pad = W.saturating_sub(visible_len);
    println!("  {}  {}{} {}", dim("│"), content, " ".repeat(pad), dim("│"));
}

fn line_box_center(content: &str) {
    let visible_len = strip_ansi(content).chars().count();
    let total_pad = W.saturating_sub(visible_len);
    let left = total_pad / 2;
    let right = total_pad - left;
    println!("  {}  {}{}{} {}", dim("│"), " ".repeat(left), content, " ".repeat(right), dim("│"));
}

fn line_box_empty() { line_box(""); }

fn strip_ansi(s: &str) -> String {
    let mut out = String::new();
    let mut in_escape = false;
    for c in s.chars() {
        if c == '\x1b' { in_escape = true; continue; }
        if in_escape { if c == 'm' { in_escape = false; } continue; }
        out.push(c);
    }
    out
}

fn kv(key: &str, val: &str) -> String {
    format!("{} {}", muted(key), val.white())
}

fn section(title: &str) {
    println!();
    println!("  {}", title.white().bold());
    println!("  {}", dim(&"─".repeat(56)));
}

// ─── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "fakenews")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Fake news classification API")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API
    Serve {
        /// Server host
        #[arg(long, env = "API_HOST", default_value = "0.0.0.0")]
        host: String,

        /// Server port
        #[arg(short, long, env = "API_PORT", default_value = "8000")]
        port: u16,

        /// Model artifact file
        #[arg(short, long, env = "MODEL_PATH")]
        model: Option<PathBuf>,
    },

    /// Classify a single article
    Predict {
        /// Article title
        #[arg(long, default_value = "")]
        title: String,

        /// Article body
        #[arg(long, default_value = "")]
        text: String,

        /// Model artifact file
        #[arg(short, long, env = "MODEL_PATH")]
        model: Option<PathBuf>,
    },

    /// Show what a model artifact contains
    Info {
        /// Model artifact file
        #[arg(short, long, env = "MODEL_PATH")]
        model: Option<PathBuf>,
    },
}

fn inference_config(model: Option<&Path>) -> InferenceConfig {
    match model {
        Some(path) => InferenceConfig::new(path),
        None => InferenceConfig::default(),
    }
}

// ─── Predict ───────────────────────────────────────────────────────────────────

/// Same JSON body the HTTP `/predict` endpoint returns
fn render_prediction(prediction: Prediction) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&PredictResponse {
        ok: true,
        prediction,
    })
}

pub fn cmd_predict(title: &str, text: &str, model: Option<&Path>) -> anyhow::Result<()> {
    let config = inference_config(model);
    let service = PredictionService::load(&config)?;

    let start = Instant::now();
    let prediction = service.predict(&ArticleInput::new(title, text))?;
    let elapsed = start.elapsed();

    tracing::debug!(elapsed_us = elapsed.as_micros() as u64, "Prediction complete");
    println!("{}", render_prediction(prediction)?);
    Ok(())
}

// ─── Info ──────────────────────────────────────────────────────────────────────

pub fn cmd_info(model: Option<&Path>) -> anyhow::Result<()> {
    let config = inference_config(model);
    let artifact = ModelArtifact::load(&config.model_path)?;

    section("Model Artifact");
    println!("  {:<12} {}", muted("File"), config.model_path.display());
    println!("  {:<12} {}", muted("Name"), artifact.metadata.name);
    println!("  {:<12} {}", muted("Created"), artifact.metadata.created_at);
    if !artifact.metadata.description.is_empty() {
        println!("  {:<12} {}", muted("About"), artifact.metadata.description);
    }
    println!("  {:<12} {}", muted("Format"), artifact.format_version);
    println!();

    println!(
        "  {:<20} {:<20} {:<14} {:>8}",
        muted("Variant"), muted("Model"), muted("Capability"), muted("Vocab")
    );
    println!("  {}", dim(&"─".repeat(66)));

    for (name, pipeline) in &artifact.variants {
        println!(
            "  {:<20} {:<20} {:<14} {:>8}",
            name,
            pipeline.classifier.name(),
            pipeline.classifier.capability_kind().to_string().truecolor(140, 140, 140),
            pipeline.vectorizer.n_features()
        );
    }

    println!();
    match artifact.select(&config.preferred_variants) {
        Ok((name, _)) => println!("  {} serving variant {}", ok("✓"), name.white().bold()),
        Err(e) => println!("  {} {}", "✗".red(), e),
    }
    println!();
    Ok(())
}

// ─── Serve ─────────────────────────────────────────────────────────────────────

pub async fn cmd_serve(host: &str, port: u16, model: Option<&Path>) -> anyhow::Result<()> {
    let config = ServerConfig {
        host: host.to_string(),
        port,
        inference: inference_config(model),
    };

    println!();
    line_box_top();
    line_box_empty();
    line_box_center(&format!("{}", "Fake News API".white().bold()));
    line_box_center(&format!("{}", dim(&format!("v{}", env!("CARGO_PKG_VERSION")))));
    line_box_empty();
    line_box_sep();
    line_box_empty();
    line_box(&kv("Status ", &format!("http://{}:{}/", host, port)));
    line_box(&kv("Predict", &format!("http://{}:{}/predict", host, port)));
    line_box(&kv("Model  ", &config.inference.model_path.display().to_string()));
    line_box_empty();
    line_box_sep();
    line_box_empty();
    line_box_center(&format!("{}", dim("ctrl+c to stop")));
    line_box_empty();
    line_box_bottom();
    println!();

    run_server(config).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_ansi() {
        let colored = format!("{}", "hello".truecolor(1, 2, 3));
        assert_eq!(strip_ansi(&colored), "hello");
    }

    #[test]
    fn test_parse_predict_command() {
        let cli = Cli::try_parse_from(["fakenews", "predict", "--title", "Breaking", "--text", "Visit now"])
            .unwrap();
        match cli.command {
            Some(Commands::Predict { title, text, .. }) => {
                assert_eq!(title, "Breaking");
                assert_eq!(text, "Visit now");
            }
            _ => panic!("expected predict command"),
        }
    }

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["fakenews"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_prediction_output_matches_api_body() {
        use crate::inference::NewsLabel;

        let output = render_prediction(Prediction {
            label: NewsLabel::Fake,
            label_id: 1,
            confidence: 0.75,
        })
        .unwrap();
        let body: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"ok": true, "label": "FAKE", "label_id": 1, "confidence": 0.75})
        );
    }

    #[test]
    fn test_inference_config_override() {
        let config = inference_config(Some(Path::new("models/custom.json")));
        assert_eq!(config.model_path, PathBuf::from("models/custom.json"));
    }
}
