//! HTTP API tests against the axum router, without binding a socket.

mod helpers;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use helpers::shared_offline_detector;
use url_verdict::server::{router, PredictResponse};

fn app() -> Router {
    router(shared_offline_detector())
}

fn predict_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn predict(url: &str) -> PredictResponse {
    let body = serde_json::json!({ "url": url }).to_string();
    let (status, value) = send(predict_request(body)).await;
    assert_eq!(status, StatusCode::OK, "unexpected status for {url:?}: {value}");
    serde_json::from_value(value).unwrap()
}

#[tokio::test]
async fn test_ip_host_with_at_sign_is_phishing() {
    let response = predict("http://192.168.1.1/login.php@verify-paypal.com").await;
    assert_eq!(response.prediction, "Phishing");
}

#[tokio::test]
async fn test_well_known_site_is_legitimate() {
    let response = predict("https://www.wikipedia.org").await;
    assert_eq!(response.prediction, "Legitimate");
}

#[tokio::test]
async fn test_empty_url_still_gets_a_label() {
    let response = predict("").await;
    assert!(
        response.prediction == "Legitimate" || response.prediction == "Phishing",
        "unexpected label {}",
        response.prediction
    );
}

#[tokio::test]
async fn test_garbage_url_still_gets_a_label() {
    for url in ["not a url at all", "::::", "http://", "\u{0}\u{7f}ä漢字"] {
        let response = predict(url).await;
        assert!(matches!(response.prediction.as_str(), "Legitimate" | "Phishing"));
    }
}

#[tokio::test]
async fn test_response_has_only_prediction_field() {
    let body = serde_json::json!({ "url": "https://www.wikipedia.org" }).to_string();
    let (_, value) = send(predict_request(body)).await;
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 1);
    assert!(object.contains_key("prediction"));
}

#[tokio::test]
async fn test_missing_url_is_bad_request() {
    let (status, value) = send(predict_request("{}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["error"], "invalid_request");
    assert!(value["detail"].as_str().is_some_and(|d| !d.is_empty()));
}

#[tokio::test]
async fn test_non_string_url_is_bad_request() {
    for body in [r#"{"url": 42}"#, r#"{"url": null}"#, r#"{"url": ["a"]}"#] {
        let (status, value) = send(predict_request(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
        assert_eq!(value["error"], "invalid_request");
    }
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let (status, value) = send(predict_request("{\"url\": ")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["error"], "invalid_request");
}

#[tokio::test]
async fn test_missing_content_type_is_bad_request() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/predict")
        .body(Body::from(r#"{"url": "https://example.com"}"#))
        .unwrap();
    let (status, value) = send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["error"], "invalid_request");
}

#[tokio::test]
async fn test_extra_fields_are_ignored() {
    let body = r#"{"url": "https://www.wikipedia.org", "source": "extension"}"#;
    let (status, value) = send(predict_request(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["prediction"], "Legitimate");
}

#[tokio::test]
async fn test_get_predict_is_not_allowed() {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/predict")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(request).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_health_reports_model() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, value) = send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["status"], "ok");
    assert_eq!(value["model_type"], "random_forest");
    assert_eq!(value["feature_count"], 18);
    assert_eq!(value["trees"], 7);
    assert_eq!(value["network_features"], false);
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ORIGIN, "chrome-extension://abcdef")
        .body(Body::from(r#"{"url": "https://www.wikipedia.org"}"#))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_cors_preflight() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/predict")
        .header(header::ORIGIN, "https://any.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert!(response.status().is_success());
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
}
