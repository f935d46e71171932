//! Linear model implementations

use super::{check_features, sigmoid, MarginScorer, ProbabilityEstimator, TextClassifier};
use crate::error::{ClassifierError, Result};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// Fitted binary logistic regression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    /// Fitted coefficients, one per feature column
    pub coefficients: Array1<f64>,
    /// Fitted intercept
    pub intercept: f64,
    /// Class labels for the negative and positive side
    pub classes: [i64; 2],
}

impl LogisticRegression {
    pub fn new(coefficients: Array1<f64>, intercept: f64, classes: [i64; 2]) -> Self {
        Self {
            coefficients,
            intercept,
            classes,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_linear(&self.coefficients, self.intercept, "logistic regression")
    }

    fn linear(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        check_features(x, self.coefficients.len())?;
        Ok(x.dot(&self.coefficients) + self.intercept)
    }
}

impl TextClassifier for LogisticRegression {
    fn name(&self) -> &'static str {
        "logistic_regression"
    }

    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<i64>> {
        let scores = self.linear(x)?;
        Ok(scores.mapv(|z| if z > 0.0 { self.classes[1] } else { self.classes[0] }))
    }
}

impl ProbabilityEstimator for LogisticRegression {
    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        let scores = self.linear(x)?;
        let mut proba = Array2::zeros((scores.len(), 2));
        for (i, &z) in scores.iter().enumerate() {
            let p = sigmoid(z);
            proba[[i, 0]] = 1.0 - p;
            proba[[i, 1]] = p;
        }
        Ok(proba)
    }
}

impl MarginScorer for LogisticRegression {
    fn decision_function(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        self.linear(x)
    }
}

pub(crate) fn validate_linear(coefficients: &Array1<f64>, intercept: f64, what: &str) -> Result<()> {
    if coefficients.is_empty() {
        return Err(ClassifierError::InvalidArtifact(format!(
            "{} has no coefficients",
            what
        )));
    }
    if !intercept.is_finite() || coefficients.iter().any(|v| !v.is_finite()) {
        return Err(ClassifierError::InvalidArtifact(format!(
            "{} has non-finite parameters",
            what
        )));
    }
    Ok(())
}
