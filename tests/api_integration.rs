//! Integration tests for the HTTP API
//!
//! Router clones share one session store, so a flow can span several requests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use melva::core::create_router;
use melva::TutorConfig;
use serde_json::Value;
use tower::ServiceExt;

fn create_test_router() -> Router {
    create_router(&TutorConfig::default())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn new_session(app: &Router, body: &str) -> String {
    let (status, json) = send(app, "POST", "/session/new", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    json["session_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_router();
    let (status, json) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], melva::VERSION);
    assert_eq!(json["sessions_active"], 0);
}

#[tokio::test]
async fn test_create_session() {
    let app = create_test_router();
    let (status, json) = send(&app, "POST", "/session/new", Some("{}")).await;

    assert_eq!(status, StatusCode::OK);
    let id = json["session_id"].as_str().unwrap();
    assert_eq!(json["websocket_url"], format!("/ws/{}", id));

    let (_, health) = send(&app, "GET", "/health", None).await;
    assert_eq!(health["sessions_active"], 1);
}

#[tokio::test]
async fn test_unknown_generator_is_bad_request() {
    let app = create_test_router();
    let (status, json) = send(&app, "POST", "/session/new", Some(r#"{"generator": "oracle"}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("oracle"));
}

#[tokio::test]
async fn test_session_not_found() {
    let app = create_test_router();

    let (status, _) = send(&app, "GET", "/session/nonexistent", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "POST", "/session/nonexistent/message", Some(r#"{"text": "hi"}"#)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "GET", "/session/nonexistent/transcript", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/session/nonexistent", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_tutor_session_flow() {
    let app = create_test_router();
    let id = new_session(&app, r#"{"context": {"genre": "jazz", "level": "beginner"}}"#).await;

    let (status, json) = send(&app, "POST", &format!("/session/{}/message", id), Some(r#"{"text": "hi"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["response"], "Hey! Ready to improve your jazz today?");
    assert_eq!(json["branch"], "GREETING");
    assert_eq!(json["intent"], "greeting");
    assert_eq!(json["turn"], 1);

    let (_, json) = send(
        &app,
        "POST",
        &format!("/session/{}/message", id),
        Some(r#"{"text": "I'm stuck and frustrated with this rhythm pattern"}"#),
    )
    .await;
    assert_eq!(json["branch"], "DIAGNOSTIC_QUESTION");
    assert_eq!(json["emotion"], "frustrated");
    assert_eq!(json["topic"], "rhythm");
    assert!(json["response"].as_str().unwrap().starts_with("I hear you"));

    let (status, json) = send(&app, "GET", &format!("/session/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["generator"], "tutor");
    assert_eq!(json["context"]["genre"], "jazz");
    assert_eq!(json["message_count"], 4);
    assert_eq!(json["memory"]["turn"], 2);
    assert!(json["memory"]["pending_diagnostic_question"].is_string());
}

#[tokio::test]
async fn test_transcript_records_both_sides() {
    let app = create_test_router();
    let id = new_session(&app, "{}").await;

    send(&app, "POST", &format!("/session/{}/message", id), Some(r#"{"text": "hello"}"#)).await;

    let (status, json) = send(&app, "GET", &format!("/session/{}/transcript", id), None).await;
    assert_eq!(status, StatusCode::OK);
    let messages = json["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "user");
    assert_eq!(messages[0]["content"], "hello");
    assert_eq!(messages[1]["role"], "assistant");
    assert_eq!(messages[1]["content"], "Hey! Ready to improve your pop today?");
    assert!(messages[1]["timestamp"].is_string());
}

#[tokio::test]
async fn test_knowledge_session() {
    let app = create_test_router();
    let id = new_session(&app, r#"{"generator": "knowledge"}"#).await;

    let (status, json) = send(
        &app,
        "POST",
        &format!("/session/{}/message", id),
        Some(r#"{"text": "What is a triad?"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["response"].as_str().unwrap().starts_with("A triad is"));
    assert!(json["branch"].is_null());
    assert_eq!(json["turn"], 1);

    let (_, json) = send(&app, "GET", &format!("/session/{}", id), None).await;
    assert_eq!(json["generator"], "knowledge");
    assert!(json["memory"].is_null());
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let app = create_test_router();
    let a = new_session(&app, "{}").await;
    let b = new_session(&app, "{}").await;
    assert_ne!(a, b);

    for _ in 0..3 {
        send(&app, "POST", &format!("/session/{}/message", a), Some(r#"{"text": "chord progression"}"#)).await;
    }

    let (_, json) = send(&app, "GET", &format!("/session/{}", a), None).await;
    assert_eq!(json["memory"]["turn"], 3);
    let (_, json) = send(&app, "GET", &format!("/session/{}", b), None).await;
    assert_eq!(json["memory"]["turn"], 0);
}

#[tokio::test]
async fn test_delete_session() {
    let app = create_test_router();
    let id = new_session(&app, "{}").await;

    let (status, _) = send(&app, "DELETE", &format!("/session/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", &format!("/session/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
