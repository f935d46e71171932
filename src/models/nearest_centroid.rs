//! Nearest centroid classifier
//!
//! Exposes neither probabilities nor a decision score.

use super::{check_features, TextClassifier};
use crate::error::{ClassifierError, Result};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearestCentroid {
    /// One row per class, in `classes` order
    pub centroids: Array2<f64>,
    pub classes: Vec<i64>,
}

impl NearestCentroid {
    pub fn new(centroids: Array2<f64>, classes: Vec<i64>) -> Self {
        Self { centroids, classes }
    }

    pub fn validate(&self) -> Result<()> {
        if self.classes.is_empty() {
            return Err(ClassifierError::InvalidArtifact(
                "nearest centroid has no classes".to_string(),
            ));
        }
        if self.centroids.nrows() != self.classes.len() || self.centroids.ncols() == 0 {
            return Err(ClassifierError::ShapeError {
                expected: format!("{} centroid rows with at least one column", self.classes.len()),
                actual: format!("{:?}", self.centroids.shape()),
            });
        }
        if self.centroids.iter().any(|v| !v.is_finite()) {
            return Err(ClassifierError::InvalidArtifact(
                "nearest centroid has non-finite centroids".to_string(),
            ));
        }
        Ok(())
    }
}

impl TextClassifier for NearestCentroid {
    fn name(&self) -> &'static str {
        "nearest_centroid"
    }

    fn n_features(&self) -> usize {
        self.centroids.ncols()
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<i64>> {
        check_features(x, self.n_features())?;
        let fallback = *self.classes.first().ok_or_else(|| {
            ClassifierError::InvalidArtifact("nearest centroid has no classes".to_string())
        })?;

        let mut predictions = Array1::zeros(x.nrows());
        for (i, sample) in x.rows().into_iter().enumerate() {
            let mut best_dist = f64::INFINITY;
            let mut best_class = fallback;

            for (centroid, &class) in self.centroids.rows().into_iter().zip(&self.classes) {
                let dist: f64 = sample
                    .iter()
                    .zip(centroid.iter())
                    .map(|(a, b)| (a - b) * (a - b))
                    .sum();
                if dist < best_dist {
                    best_dist = dist;
                    best_class = class;
                }
            }

            predictions[i] = best_class;
        }

        Ok(predictions)
    }
}
