//! Fake News Classifier - HTTP inference for a pre-trained text classifier
//!
//! This crate loads a serialized TF-IDF + linear model artifact once at
//! start-up and serves predictions over HTTP:
//! - `GET /` reports that the API is running
//! - `POST /predict` labels an article as `REAL` or `FAKE` with a confidence
//!
//! # Modules
//!
//! ## Text
//! - [`preprocessing`] - Article normalization (lowercase, links, tags, whitespace)
//! - [`feature_engineering`] - Tokenizer, count and TF-IDF vectorizers
//!
//! ## Models
//! - [`models`] - Classifiers and the capability traits they expose
//! - [`export`] - Model artifact serialization and variant selection
//! - [`inference`] - Prediction service and confidence derivation
//!
//! ## Services
//! - [`server`] - HTTP server with REST API
//! - [`cli`] - Command-line interface

// Core error handling
pub mod error;

// Text processing
pub mod preprocessing;
pub mod feature_engineering;

// Models and artifacts
pub mod models;
pub mod export;
pub mod inference;

// Services
pub mod server;
pub mod cli;

pub use error::{ClassifierError, Result};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{ClassifierError, Result};
    pub use crate::export::{ModelArtifact, SerializationFormat};
    pub use crate::feature_engineering::{CountVectorizer, TextTokenizer, TfidfVectorizer};
    pub use crate::inference::{ArticleInput, InferenceConfig, NewsLabel, Prediction, PredictionService};
    pub use crate::models::{
        CapabilityKind, Classifier, MarginScorer, ModelCapability, ProbabilityEstimator,
        TextClassifier, TextPipeline,
    };
    pub use crate::preprocessing::TextCleaner;
    pub use crate::server::{create_router, run_server, AppState, ServerConfig};
}
