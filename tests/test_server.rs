//! Integration test: Server API endpoints

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use fake_news_classifier::models::{Classifier, LinearSvc};
use ndarray::array;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn predict_request(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_root_endpoint() {
    let app = common::test_app();
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"ok": true, "message": "Fake News API is running"})
    );
}

#[tokio::test]
async fn test_predict_fake_article() {
    let app = common::test_app();
    let response = app
        .oneshot(predict_request(
            r#"{"title": "Breaking", "text": "Visit http://x.com now <b>FREE</b>"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["label"], "FAKE");
    assert_eq!(body["label_id"], 1);
    let confidence = body["confidence"].as_f64().unwrap();
    assert!((0.5..=1.0).contains(&confidence));
}

#[tokio::test]
async fn test_predict_real_article() {
    let app = common::test_app();
    let response = app
        .oneshot(predict_request(r#"{"title": "Senate", "text": "passes the budget"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["label"], "REAL");
    assert_eq!(body["label_id"], 0);
}

#[tokio::test]
async fn test_predict_empty_body_object() {
    let app = common::test_app();
    let response = app.oneshot(predict_request("{}")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["ok"], true);
    assert!(body["label"] == "REAL" || body["label"] == "FAKE");
    let confidence = body["confidence"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&confidence));
}

#[tokio::test]
async fn test_predict_with_probabilistic_model() {
    let app = common::app_with(common::logreg());
    let response = app
        .oneshot(predict_request(r#"{"title": "FREE", "text": "breaking"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["label"], "FAKE");
    assert!(body["confidence"].as_f64().unwrap() >= 0.5);
}

#[tokio::test]
async fn test_predict_with_opaque_model() {
    let app = common::app_with(common::centroid());
    let response = app
        .oneshot(predict_request(r#"{"title": "Breaking", "text": "free"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["label"], "FAKE");
    assert_eq!(body["confidence"].as_f64().unwrap(), 0.5);
}

#[tokio::test]
async fn test_predict_unexpected_label_is_internal_error() {
    let app = common::app_with(Classifier::LinearSvc(LinearSvc::new(
        array![0.5, 2.0, -3.0],
        -0.25,
        [0, 7],
    )));
    let response = app
        .oneshot(predict_request(r#"{"title": "Breaking", "text": "free"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["ok"], false);
    assert_eq!(body["message"], "An internal error occurred");
}

#[tokio::test]
async fn test_predict_malformed_json() {
    let app = common::test_app();
    let response = app.oneshot(predict_request("{not json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["ok"], false);
}

#[tokio::test]
async fn test_predict_wrong_field_type() {
    let app = common::test_app();
    let response = app
        .oneshot(predict_request(r#"{"title": 42}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_route() {
    let app = common::test_app();
    let response = app
        .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["ok"], false);
}

#[tokio::test]
async fn test_wrong_method() {
    let app = common::test_app();
    let response = app
        .oneshot(Request::builder().uri("/predict").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body_json(response).await["ok"], false);
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let app = common::test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::ORIGIN, "http://frontend.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = common::test_app();
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/predict")
                .header(header::ORIGIN, "http://frontend.example")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(response.status().is_success());
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}
