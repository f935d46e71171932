//! Prediction service
//!
//! Owns the model selected at start-up and turns raw article fields into a
//! labelled prediction:
//! - merge title and text, normalize
//! - vectorize as a single-row batch
//! - classify and map the raw label
//! - derive confidence from the model's capability

use super::InferenceConfig;
use crate::error::{ClassifierError, Result};
use crate::export::ModelArtifact;
use crate::feature_engineering::TfidfVectorizer;
use crate::models::{sigmoid, CapabilityKind, ModelCapability, TextPipeline};
use crate::preprocessing::TextCleaner;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// Confidence reported when the model offers no probability or score
pub const UNINFORMED_CONFIDENCE: f64 = 0.5;

/// Article fields accepted by the predict operation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleInput {
    pub title: String,
    pub text: String,
}

impl ArticleInput {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }
}

/// Binary news label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NewsLabel {
    Real,
    Fake,
}

impl NewsLabel {
    /// Map the classifier's raw output; only 0 and 1 are meaningful.
    pub fn from_raw(raw: i64) -> Result<Self> {
        match raw {
            0 => Ok(NewsLabel::Real),
            1 => Ok(NewsLabel::Fake),
            other => Err(ClassifierError::UnexpectedLabel(other)),
        }
    }

    pub fn id(self) -> u8 {
        match self {
            NewsLabel::Real => 0,
            NewsLabel::Fake => 1,
        }
    }
}

impl fmt::Display for NewsLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NewsLabel::Real => f.write_str("REAL"),
            NewsLabel::Fake => f.write_str("FAKE"),
        }
    }
}

/// Outcome of a single prediction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: NewsLabel,
    pub label_id: u8,
    /// Estimated certainty in [0, 1]
    pub confidence: f64,
}

/// Immutable prediction service shared by all requests
pub struct PredictionService {
    variant: String,
    cleaner: TextCleaner,
    vectorizer: TfidfVectorizer,
    model: ModelCapability,
}

impl fmt::Debug for PredictionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredictionService")
            .field("variant", &self.variant)
            .field("model", &self.model.name())
            .field("capability", &self.model.kind())
            .field("n_features", &self.vectorizer.n_features())
            .finish()
    }
}

impl PredictionService {
    /// Load the artifact named by `config` and select its preferred variant.
    pub fn load(config: &InferenceConfig) -> Result<Self> {
        info!(path = %config.model_path.display(), "Loading model artifact");
        let artifact = ModelArtifact::load(&config.model_path)?;
        Self::from_artifact(artifact, &config.preferred_variants)
    }

    pub fn from_artifact<S: AsRef<str>>(mut artifact: ModelArtifact, preference: &[S]) -> Result<Self> {
        let variant = artifact.select(preference)?.0.to_string();
        let pipeline = artifact.variants.remove(&variant).ok_or_else(|| {
            ClassifierError::VariantNotFound {
                looked_for: vec![variant.clone()],
            }
        })?;
        Self::from_pipeline(variant, pipeline)
    }

    pub fn from_pipeline(variant: impl Into<String>, pipeline: TextPipeline) -> Result<Self> {
        pipeline.validate()?;

        let variant = variant.into();
        let TextPipeline {
            vectorizer,
            classifier,
        } = pipeline;
        let model = classifier.into_capability();

        info!(
            variant = %variant,
            model = model.name(),
            capability = %model.kind(),
            n_features = vectorizer.n_features(),
            "Model selected"
        );

        Ok(Self {
            variant,
            cleaner: TextCleaner::new(),
            vectorizer,
            model,
        })
    }

    pub fn variant(&self) -> &str {
        &self.variant
    }

    pub fn model_name(&self) -> &'static str {
        self.model.name()
    }

    pub fn capability(&self) -> CapabilityKind {
        self.model.kind()
    }

    pub fn n_features(&self) -> usize {
        self.vectorizer.n_features()
    }

    /// Merged and normalized text that would be fed to the model
    pub fn normalize(&self, input: &ArticleInput) -> String {
        self.cleaner.clean_article(&input.title, &input.text)
    }

    pub fn predict(&self, input: &ArticleInput) -> Result<Prediction> {
        let cleaned = self.normalize(input);
        let x = self.vectorizer.transform(std::slice::from_ref(&cleaned))?;

        let raw = self
            .model
            .predict(&x)?
            .iter()
            .next()
            .copied()
            .ok_or_else(|| ClassifierError::InferenceError("model returned no prediction".to_string()))?;
        let label = NewsLabel::from_raw(raw)?;
        let confidence = self.confidence(&x)?;

        debug!(
            label = %label,
            confidence,
            normalized_chars = cleaned.len(),
            "Prediction complete"
        );

        Ok(Prediction {
            label,
            label_id: label.id(),
            confidence,
        })
    }

    fn confidence(&self, x: &Array2<f64>) -> Result<f64> {
        let value = match &self.model {
            ModelCapability::Probabilistic(model) => {
                let proba = model.predict_proba(x)?;
                proba
                    .rows()
                    .into_iter()
                    .next()
                    .and_then(|row| row.iter().copied().reduce(f64::max))
                    .ok_or_else(|| {
                        ClassifierError::InferenceError("model returned no probabilities".to_string())
                    })?
            }
            ModelCapability::Margin(model) => {
                let score = model.decision_function(x)?.iter().next().copied().ok_or_else(|| {
                    ClassifierError::InferenceError("model returned no decision score".to_string())
                })?;
                sigmoid(score.abs())
            }
            ModelCapability::Opaque(_) => UNINFORMED_CONFIDENCE,
        };

        if !value.is_finite() {
            return Err(ClassifierError::InferenceError(format!(
                "non-finite confidence {}",
                value
            )));
        }
        Ok(value.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature_engineering::{CountVectorizer, TextTokenizer};
    use crate::models::{Classifier, LinearSvc, LogisticRegression, NearestCentroid};
    use ndarray::array;
    use std::collections::HashMap;

    fn vectorizer() -> TfidfVectorizer {
        let vocab: HashMap<String, usize> = [
            ("breaking".to_string(), 0),
            ("free".to_string(), 1),
            ("senate".to_string(), 2),
        ]
        .into_iter()
        .collect();
        TfidfVectorizer::new(
            CountVectorizer::new(TextTokenizer::new(), vocab),
            array![1.0, 1.5, 1.2],
        )
    }

    fn service(classifier: Classifier) -> PredictionService {
        PredictionService::from_pipeline("test", TextPipeline::new(vectorizer(), classifier)).unwrap()
    }

    fn margin_service() -> PredictionService {
        service(Classifier::LinearSvc(LinearSvc::new(array![0.5, 2.0, -3.0], -0.25, [0, 1])))
    }

    #[test]
    fn test_label_mapping() {
        assert_eq!(NewsLabel::from_raw(0).unwrap(), NewsLabel::Real);
        assert_eq!(NewsLabel::from_raw(1).unwrap(), NewsLabel::Fake);
        assert!(matches!(
            NewsLabel::from_raw(2),
            Err(ClassifierError::UnexpectedLabel(2))
        ));
        assert_eq!(NewsLabel::Fake.to_string(), "FAKE");
        assert_eq!(serde_json::to_string(&NewsLabel::Real).unwrap(), "\"REAL\"");
    }

    #[test]
    fn test_article_input_defaults() {
        let input: ArticleInput = serde_json::from_str("{}").unwrap();
        assert_eq!(input, ArticleInput::default());

        let input: ArticleInput = serde_json::from_str(r#"{"text": "body only"}"#).unwrap();
        assert_eq!(input.title, "");
        assert_eq!(input.text, "body only");
    }

    #[test]
    fn test_scenario_margin_model() {
        let service = margin_service();
        let input = ArticleInput::new("Breaking", "Visit http://x.com now <b>FREE</b>");
        assert_eq!(service.normalize(&input), "breaking visit now free");

        let prediction = service.predict(&input).unwrap();
        assert_eq!(prediction.label, NewsLabel::Fake);
        assert_eq!(prediction.label_id, 1);
        assert!((0.5..=1.0).contains(&prediction.confidence));

        let x = service.vectorizer.transform(&["breaking visit now free".to_string()]).unwrap();
        let score = match &service.model {
            ModelCapability::Margin(m) => m.decision_function(&x).unwrap()[0],
            other => panic!("unexpected capability {:?}", other.kind()),
        };
        assert!((prediction.confidence - sigmoid(score.abs())).abs() < 1e-12);
    }

    #[test]
    fn test_empty_input_still_predicts() {
        let service = margin_service();
        let input = ArticleInput::default();
        assert_eq!(service.normalize(&input), "");

        // All-zero features leave only the intercept
        let prediction = service.predict(&input).unwrap();
        assert_eq!(prediction.label, NewsLabel::Real);
        assert!((prediction.confidence - sigmoid(0.25)).abs() < 1e-12);
    }

    #[test]
    fn test_probabilistic_confidence_is_max_class_probability() {
        let service = service(Classifier::LogisticRegression(LogisticRegression::new(
            array![-3.0, -3.0, 4.0],
            0.0,
            [0, 1],
        )));
        assert_eq!(service.capability(), CapabilityKind::Probabilistic);

        let prediction = service.predict(&ArticleInput::new("Senate", "")).unwrap();
        assert_eq!(prediction.label, NewsLabel::Fake);
        assert!((prediction.confidence - sigmoid(4.0)).abs() < 1e-12);

        let prediction = service.predict(&ArticleInput::new("Breaking", "")).unwrap();
        assert_eq!(prediction.label, NewsLabel::Real);
        assert!((prediction.confidence - sigmoid(3.0)).abs() < 1e-12);
    }

    #[test]
    fn test_opaque_confidence_is_exactly_half() {
        let service = service(Classifier::NearestCentroid(NearestCentroid::new(
            array![[0.0, 0.0, 1.0], [1.0, 1.0, 0.0]],
            vec![0, 1],
        )));
        assert_eq!(service.capability(), CapabilityKind::Opaque);

        for input in [
            ArticleInput::new("Breaking", "free"),
            ArticleInput::new("senate", ""),
            ArticleInput::default(),
        ] {
            let prediction = service.predict(&input).unwrap();
            assert_eq!(prediction.confidence, 0.5);
        }
    }

    #[test]
    fn test_unexpected_raw_label_is_an_error() {
        let service = service(Classifier::NearestCentroid(NearestCentroid::new(
            array![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]],
            vec![0, 4],
        )));
        let err = service.predict(&ArticleInput::new("breaking free senate", "")).unwrap_err();
        assert!(matches!(err, ClassifierError::UnexpectedLabel(4)));
    }

    #[test]
    fn test_confidence_bounds_across_inputs() {
        let services = [
            margin_service(),
            service(Classifier::LogisticRegression(LogisticRegression::new(
                array![40.0, -25.0, 3.0],
                1.0,
                [0, 1],
            ))),
            service(Classifier::LinearSvc(
                LinearSvc::new(array![1.0, 1.0, -1.0], 0.0, [0, 1]).with_platt(-1.7, 0.1),
            )),
        ];
        let inputs = [
            ArticleInput::default(),
            ArticleInput::new("BREAKING", "free free free"),
            ArticleInput::new("senate", "<p>senate</p> www.gov.example"),
        ];

        for service in &services {
            for input in &inputs {
                let prediction = service.predict(input).unwrap();
                assert!(
                    (0.0..=1.0).contains(&prediction.confidence),
                    "{:?} gave {}",
                    service,
                    prediction.confidence
                );
            }
        }
    }

    #[test]
    fn test_from_artifact_uses_preference() {
        let artifact = ModelArtifact::new("test")
            .with_variant(
                "logreg_final",
                TextPipeline::new(
                    vectorizer(),
                    Classifier::LogisticRegression(LogisticRegression::new(array![1.0, 1.0, 1.0], 0.0, [0, 1])),
                ),
            )
            .with_variant(
                "svc_final",
                TextPipeline::new(
                    vectorizer(),
                    Classifier::LinearSvc(LinearSvc::new(array![1.0, 1.0, 1.0], 0.0, [0, 1])),
                ),
            );

        let service = PredictionService::from_artifact(artifact, &["svc_final", "logreg_final"]).unwrap();
        assert_eq!(service.variant(), "svc_final");
        assert_eq!(service.capability(), CapabilityKind::Margin);
        assert_eq!(service.n_features(), 3);
    }
}
