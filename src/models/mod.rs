//! Classifier parameters and capabilities
//!
//! Provides the fitted classifiers a model artifact can carry:
//! - Logistic regression (probability estimates)
//! - Linear SVC, optionally Platt-calibrated (decision scores or probabilities)
//! - Nearest centroid (labels only)
//!
//! Each classifier is turned once, at load time, into a [`ModelCapability`]
//! that records which confidence source it offers.

pub mod linear_models;
pub mod nearest_centroid;
pub mod pipeline;
pub mod svm;

pub use linear_models::LogisticRegression;
pub use nearest_centroid::NearestCentroid;
pub use pipeline::TextPipeline;
pub use svm::{CalibratedLinearSvc, LinearSvc, PlattParams};

use crate::error::{ClassifierError, Result};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fitted classifier that can assign labels
pub trait TextClassifier: fmt::Debug + Send + Sync {
    /// Short identifier used in logs and the artifact format
    fn name(&self) -> &'static str;

    /// Number of feature columns the classifier expects
    fn n_features(&self) -> usize;

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<i64>>;
}

/// Classifier that exposes class probabilities
pub trait ProbabilityEstimator: TextClassifier {
    /// One row per sample, one column per class in the fitted class order
    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array2<f64>>;
}

/// Classifier that exposes a signed decision score
pub trait MarginScorer: TextClassifier {
    fn decision_function(&self, x: &Array2<f64>) -> Result<Array1<f64>>;
}

/// Logistic function
pub fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

pub(crate) fn check_features(x: &Array2<f64>, expected: usize) -> Result<()> {
    if x.ncols() != expected {
        return Err(ClassifierError::ShapeError {
            expected: format!("{} feature columns", expected),
            actual: format!("{} feature columns", x.ncols()),
        });
    }
    Ok(())
}

/// Serialized classifier variants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classifier {
    LogisticRegression(LogisticRegression),
    LinearSvc(LinearSvc),
    NearestCentroid(NearestCentroid),
}

impl Classifier {
    pub fn name(&self) -> &'static str {
        match self {
            Classifier::LogisticRegression(m) => m.name(),
            Classifier::LinearSvc(m) => m.name(),
            Classifier::NearestCentroid(m) => m.name(),
        }
    }

    pub fn n_features(&self) -> usize {
        match self {
            Classifier::LogisticRegression(m) => m.n_features(),
            Classifier::LinearSvc(m) => m.n_features(),
            Classifier::NearestCentroid(m) => m.n_features(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Classifier::LogisticRegression(m) => m.validate(),
            Classifier::LinearSvc(m) => m.validate(),
            Classifier::NearestCentroid(m) => m.validate(),
        }
    }

    /// Which confidence source this classifier will offer once loaded.
    pub fn capability_kind(&self) -> CapabilityKind {
        match self {
            Classifier::LogisticRegression(_) => CapabilityKind::Probabilistic,
            Classifier::LinearSvc(svc) if svc.platt.is_some() => CapabilityKind::Probabilistic,
            Classifier::LinearSvc(_) => CapabilityKind::Margin,
            Classifier::NearestCentroid(_) => CapabilityKind::Opaque,
        }
    }

    pub fn into_capability(self) -> ModelCapability {
        match self {
            Classifier::LogisticRegression(m) => ModelCapability::Probabilistic(Box::new(m)),
            Classifier::LinearSvc(mut svc) => match svc.platt.take() {
                Some(platt) => {
                    ModelCapability::Probabilistic(Box::new(CalibratedLinearSvc::new(svc, platt)))
                }
                None => ModelCapability::Margin(Box::new(svc)),
            },
            Classifier::NearestCentroid(m) => ModelCapability::Opaque(Box::new(m)),
        }
    }
}

/// Confidence source of a loaded classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityKind {
    Probabilistic,
    Margin,
    Opaque,
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CapabilityKind::Probabilistic => "probabilistic",
            CapabilityKind::Margin => "margin",
            CapabilityKind::Opaque => "opaque",
        };
        f.write_str(name)
    }
}

/// A loaded classifier tagged with its confidence source
#[derive(Debug)]
pub enum ModelCapability {
    Probabilistic(Box<dyn ProbabilityEstimator>),
    Margin(Box<dyn MarginScorer>),
    Opaque(Box<dyn TextClassifier>),
}

impl ModelCapability {
    pub fn kind(&self) -> CapabilityKind {
        match self {
            ModelCapability::Probabilistic(_) => CapabilityKind::Probabilistic,
            ModelCapability::Margin(_) => CapabilityKind::Margin,
            ModelCapability::Opaque(_) => CapabilityKind::Opaque,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ModelCapability::Probabilistic(m) => m.name(),
            ModelCapability::Margin(m) => m.name(),
            ModelCapability::Opaque(m) => m.name(),
        }
    }

    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<i64>> {
        match self {
            ModelCapability::Probabilistic(m) => m.predict(x),
            ModelCapability::Margin(m) => m.predict(x),
            ModelCapability::Opaque(m) => m.predict(x),
        }
    }
}
