use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::json;
use touchline_api::build_app;
use touchline_core::FALLBACK_GUIDANCE;
use tower::ServiceExt;

// These tests only drive routes that never dial out: knowledge, pattern and
// fallback replies. The live handlers are covered by engine unit tests with
// stub sources.

#[tokio::test]
async fn health_reports_status_and_metrics() {
    let app = build_app().expect("app should build");

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(parsed.get("status").and_then(|v| v.as_str()), Some("ok"));
    assert!(parsed.get("metrics").is_some());
}

#[tokio::test]
async fn chat_rejects_blank_message() {
    let app = build_app().expect("app should build");

    let request = Request::builder()
        .method("POST")
        .uri("/v1/chat")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "message": "   " }).to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(parsed.get("error").is_some());
}

#[tokio::test]
async fn chat_answers_knowledge_question() {
    let app = build_app().expect("app should build");

    let request = Request::builder()
        .method("POST")
        .uri("/v1/chat")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "message": "Tell me about Manchester United" }).to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let reply = parsed
        .get("response")
        .and_then(|v| v.as_str())
        .expect("response field should be present");

    assert!(reply.contains("Manchester United"));
}

#[tokio::test]
async fn chat_falls_back_for_unknown_topic() {
    let app = build_app().expect("app should build");

    let request = Request::builder()
        .method("POST")
        .uri("/v1/chat")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "message": "xyzzy" }).to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(
        parsed.get("response").and_then(|v| v.as_str()),
        Some(FALLBACK_GUIDANCE)
    );
}

#[tokio::test]
async fn chat_greets_on_small_talk() {
    let app = build_app().expect("app should build");

    let request = Request::builder()
        .method("POST")
        .uri("/v1/chat")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "message": "hello!" }).to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let reply = parsed
        .get("response")
        .and_then(|v| v.as_str())
        .expect("response field should be present");

    assert!(reply.starts_with("Hello"));
}
