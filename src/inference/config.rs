//! Inference configuration

use crate::export::DEFAULT_VARIANT_PREFERENCE;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Artifact file loaded when no path is configured
pub const DEFAULT_MODEL_PATH: &str = "fake_news_models_final.bin";

/// Configuration for loading the prediction model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Path of the model artifact
    pub model_path: PathBuf,

    /// Variant names to try, most preferred first
    pub preferred_variants: Vec<String>,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL_PATH)
    }
}

impl InferenceConfig {
    pub fn new(model_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            preferred_variants: DEFAULT_VARIANT_PREFERENCE
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    pub fn with_preferred_variants<I, S>(mut self, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preferred_variants = variants.into_iter().map(Into::into).collect();
        self
    }
}
