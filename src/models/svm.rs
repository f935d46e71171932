//! Linear support vector classifier

use super::linear_models::validate_linear;
use super::{check_features, MarginScorer, ProbabilityEstimator, TextClassifier};
use crate::error::{ClassifierError, Result};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// Platt scaling parameters fitted on the decision function.
///
/// P(y = positive | f) = 1 / (1 + exp(a * f + b))
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlattParams {
    pub a: f64,
    pub b: f64,
}

impl PlattParams {
    pub fn probability(&self, score: f64) -> f64 {
        1.0 / (1.0 + (self.a * score + self.b).exp())
    }
}

/// Fitted binary linear SVC: f(x) = w·x + b
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearSvc {
    pub coefficients: Array1<f64>,
    pub intercept: f64,
    /// Class labels for the negative and positive side of the margin
    pub classes: [i64; 2],
    /// Present when the SVC was trained with probability estimates
    pub platt: Option<PlattParams>,
}

impl LinearSvc {
    pub fn new(coefficients: Array1<f64>, intercept: f64, classes: [i64; 2]) -> Self {
        Self {
            coefficients,
            intercept,
            classes,
            platt: None,
        }
    }

    pub fn with_platt(mut self, a: f64, b: f64) -> Self {
        self.platt = Some(PlattParams { a, b });
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_linear(&self.coefficients, self.intercept, "linear svc")?;
        if let Some(platt) = &self.platt {
            if !platt.a.is_finite() || !platt.b.is_finite() {
                return Err(ClassifierError::InvalidArtifact(
                    "linear svc has non-finite Platt parameters".to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl TextClassifier for LinearSvc {
    fn name(&self) -> &'static str {
        "linear_svc"
    }

    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<i64>> {
        let scores = self.decision_function(x)?;
        Ok(scores.mapv(|f| if f > 0.0 { self.classes[1] } else { self.classes[0] }))
    }
}

impl MarginScorer for LinearSvc {
    fn decision_function(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        check_features(x, self.coefficients.len())?;
        Ok(x.dot(&self.coefficients) + self.intercept)
    }
}

/// Linear SVC paired with its Platt calibration
#[derive(Debug, Clone)]
pub struct CalibratedLinearSvc {
    svc: LinearSvc,
    platt: PlattParams,
}

impl CalibratedLinearSvc {
    pub fn new(svc: LinearSvc, platt: PlattParams) -> Self {
        Self { svc, platt }
    }
}

impl TextClassifier for CalibratedLinearSvc {
    fn name(&self) -> &'static str {
        "linear_svc"
    }

    fn n_features(&self) -> usize {
        self.svc.n_features()
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<i64>> {
        self.svc.predict(x)
    }
}

impl ProbabilityEstimator for CalibratedLinearSvc {
    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        let scores = self.svc.decision_function(x)?;
        let mut proba = Array2::zeros((scores.len(), 2));
        for (i, &f) in scores.iter().enumerate() {
            let p = self.platt.probability(f);
            proba[[i, 0]] = 1.0 - p;
            proba[[i, 1]] = p;
        }
        Ok(proba)
    }
}
