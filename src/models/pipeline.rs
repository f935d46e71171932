//! Vectorizer + classifier pairing stored per model variant

use super::Classifier;
use crate::error::{ClassifierError, Result};
use crate::feature_engineering::TfidfVectorizer;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextPipeline {
    pub vectorizer: TfidfVectorizer,
    pub classifier: Classifier,
}

impl TextPipeline {
    pub fn new(vectorizer: TfidfVectorizer, classifier: Classifier) -> Self {
        Self {
            vectorizer,
            classifier,
        }
    }

    /// Check both stages and that the vectorizer output fits the classifier input.
    pub fn validate(&self) -> Result<()> {
        self.vectorizer.validate()?;
        self.classifier.validate()?;

        if self.vectorizer.n_features() != self.classifier.n_features() {
            return Err(ClassifierError::ShapeError {
                expected: format!(
                    "{} classifier features (vocabulary size)",
                    self.vectorizer.n_features()
                ),
                actual: format!("{} classifier features", self.classifier.n_features()),
            });
        }
        Ok(())
    }
}
