//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use fake_news_classifier::export::ModelArtifact;
use fake_news_classifier::feature_engineering::{CountVectorizer, TextTokenizer, TfidfVectorizer};
use fake_news_classifier::inference::{InferenceConfig, PredictionService};
use fake_news_classifier::models::{
    Classifier, LinearSvc, LogisticRegression, NearestCentroid, TextPipeline,
};
use fake_news_classifier::server::{create_router, AppState, ServerConfig};
use ndarray::array;

pub fn vectorizer() -> TfidfVectorizer {
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

/// Uncalibrated SVC: "breaking"/"free" push towards FAKE, "senate" towards REAL
pub fn svc() -> Classifier {
    Classifier::LinearSvc(LinearSvc::new(array![0.5, 2.0, -3.0], -0.25, [0, 1]))
}

pub fn logreg() -> Classifier {
    Classifier::LogisticRegression(LogisticRegression::new(array![0.4, 1.5, -2.0], -0.1, [0, 1]))
}

pub fn centroid() -> Classifier {
    Classifier::NearestCentroid(NearestCentroid::new(
        array![[0.0, 0.0, 1.0], [0.6, 0.8, 0.0]],
        vec![0, 1],
    ))
}

/// Artifact holding both preferred variants
pub fn artifact() -> ModelArtifact {
    ModelArtifact::new("fake-news-test")
        .with_description("integration fixture")
        .with_variant("svc_final", TextPipeline::new(vectorizer(), svc()))
        .with_variant("logreg_final", TextPipeline::new(vectorizer(), logreg()))
}

pub fn service(classifier: Classifier) -> PredictionService {
    PredictionService::from_pipeline("test", TextPipeline::new(vectorizer(), classifier))
        .expect("fixture pipeline is valid")
}

pub fn server_config(model_path: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        inference: InferenceConfig::new(model_path),
    }
}

pub fn app_with(classifier: Classifier) -> axum::Router {
    let config = server_config(Path::new("unused.bin"));
    let state = Arc::new(AppState::new(config, service(classifier)));
    create_router(state)
}

pub fn test_app() -> axum::Router {
    app_with(svc())
}
