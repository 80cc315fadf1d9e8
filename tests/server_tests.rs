// HTTP API tests
// Author: kelexine (https://github.com/kelexine)

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::MockBackend;
use gemlens::analysis::Analyzer;
use gemlens::config::AppConfig;
use gemlens::error::{AnalyzerError, MISSING_IMAGE_MESSAGE};
use gemlens::server::create_router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn router(backend: &Arc<MockBackend>) -> axum::Router {
    let mut config = AppConfig::default();
    config.analysis.default_language = "Armenian".to_string();
    create_router(config, Analyzer::new(backend.clone(), "gemini-2.5-flash"))
}

async fn post_analyze(app: axum::Router, body: String) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::post("/v1/analyze")
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_analyze_endpoint_returns_result() {
    let backend = Arc::new(MockBackend::replying(vec![Ok(common::envelope(
        &common::park_analysis().to_string(),
    ))]));

    let body = json!({
        "image": { "type": "base64", "media_type": "image/png", "data": common::PNG_B64 },
        "language": "English"
    });
    let (status, json) = post_analyze(router(&backend), body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, common::park_analysis());
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn test_default_language_from_config() {
    let backend = Arc::new(MockBackend::replying(vec![Ok(common::envelope(
        &common::park_analysis().to_string(),
    ))]));

    let body = json!({ "image": { "type": "base64", "data": common::PNG_B64 } });
    let (status, _) = post_analyze(router(&backend), body.to_string()).await;
    assert_eq!(status, StatusCode::OK);

    let (request, _) = backend.last_request().unwrap();
    let instruction = serde_json::to_string(&request.system_instruction).unwrap();
    assert!(instruction.contains("must be in Armenian"));
}

#[tokio::test]
async fn test_missing_image_is_bad_request_without_call() {
    let bodies = [
        r#"{"language":"English"}"#,
        r#"{"image":null}"#,
        r#"{"image":{"type":"base64","data":""}}"#,
    ];

    for body in bodies {
        let backend = Arc::new(MockBackend::default());
        let (status, json) = post_analyze(router(&backend), body.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
        assert_eq!(json["type"], "error");
        assert_eq!(json["error"]["type"], "invalid_request_error");
        assert_eq!(json["error"]["message"], MISSING_IMAGE_MESSAGE, "body: {}", body);
        assert_eq!(backend.calls(), 0);
    }
}

#[tokio::test]
async fn test_unsupported_image_is_bad_request() {
    let backend = Arc::new(MockBackend::default());

    let body = json!({ "image": { "type": "base64", "media_type": "image/bmp", "data": "Qk0=" } });
    let (status, json) = post_analyze(router(&backend), body.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"]["message"].as_str().unwrap().contains("image/bmp"));
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_provider_failure_is_bad_gateway_with_generic_message() {
    let backend = Arc::new(MockBackend::replying(vec![Err(AnalyzerError::GeminiApi(
        "HTTP 503 Service Unavailable: overloaded".to_string(),
    ))]));

    let body = json!({ "image": { "type": "base64", "data": common::PNG_B64 } });
    let (status, json) = post_analyze(router(&backend), body.to_string()).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["error"]["type"], "api_error");
    assert_eq!(
        json["error"]["message"],
        "Analysis failed: the analysis service returned an error."
    );
}

#[tokio::test]
async fn test_invalid_model_output_is_bad_gateway() {
    let backend = Arc::new(MockBackend::replying(vec![Ok(common::envelope("{\"summary\": \"only\"}"))]));

    let body = json!({ "image": { "type": "base64", "data": common::PNG_B64 } });
    let (status, json) = post_analyze(router(&backend), body.to_string()).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["error"]["type"], "invalid_response_error");
}

#[tokio::test]
async fn test_health_endpoint() {
    let backend = Arc::new(MockBackend::default());
    let response = router(&backend)
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["status"], "healthy");
    assert!(json["checks"]["model"]["message"]
        .as_str()
        .unwrap()
        .contains("gemini-2.5-flash"));
}

#[tokio::test]
async fn test_metrics_endpoint_exposes_analyses() {
    let backend = Arc::new(MockBackend::replying(vec![Ok(common::envelope(
        &common::park_analysis().to_string(),
    ))]));
    let app = router(&backend);

    let body = json!({ "image": { "type": "base64", "data": common::PNG_B64 } });
    post_analyze(app.clone(), body.to_string()).await;

    let response = app
        .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("analyses_total"));
    assert!(text.contains("requests_total"));
}
