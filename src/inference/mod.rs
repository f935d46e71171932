//! Inference module
//!
//! Provides the prediction path:
//! - Model artifact loading and variant selection at start-up
//! - Text normalization and TF-IDF vectorization per request
//! - Label mapping (0 → REAL, 1 → FAKE)
//! - Confidence from class probabilities, decision margins, or a fixed 0.5

mod config;
mod engine;

pub use config::{InferenceConfig, DEFAULT_MODEL_PATH};
pub use engine::{ArticleInput, NewsLabel, Prediction, PredictionService, UNINFORMED_CONFIDENCE};
