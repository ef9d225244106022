//! HTTP routing tests against the axum router (no socket)

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use matchmaker::gateway::router;
use matchmaker::{InMemoryStore, MatchEngine};

fn app(group_size: usize) -> Router {
    let engine = MatchEngine::with_store(InMemoryStore::new(), group_size).unwrap();
    router(Arc::new(engine))
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_user(body: impl Into<Body>) -> Request<Body> {
    Request::post("/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

fn enroll(name: &str) -> Request<Body> {
    post_user(json!({"name": name, "skill": 1500.0, "latency": 35.0}).to_string())
}

#[tokio::test]
async fn enroll_returns_created() {
    let app = app(3);
    let (status, body) = send(&app, enroll("alice")).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["name"], "alice");
    assert_eq!(body["data"]["queued"], true);
    assert!(body["data"].get("group").is_none());
}

#[tokio::test]
async fn completing_enroll_reports_group() {
    let app = app(2);
    send(&app, enroll("a")).await;
    let (status, body) = send(&app, enroll("b")).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["queued"], false);
    assert_eq!(body["data"]["group"], json!(["a", "b"]));

    let (_, queue) = send(&app, Request::get("/api/v1/queue").body(Body::empty()).unwrap()).await;
    assert_eq!(queue["data"]["queued"], 0);
    assert_eq!(queue["data"]["group_size"], 2);
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = app(3);

    let (status, body) = send(&app, post_user("{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1001);

    // Wrong field type is also a 400, not a 422
    let (status, _) = send(&app, post_user(r#"{"name":"x","skill":"high","latency":1}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, post_user(r#"{"skill":1,"latency":1}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_name_is_bad_request() {
    let app = app(3);
    let (status, _) = send(&app, post_user(r#"{"name":"  ","skill":1,"latency":1}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, queue) = send(&app, Request::get("/api/v1/queue").body(Body::empty()).unwrap()).await;
    assert_eq!(queue["data"]["queued"], 0);
}

#[tokio::test]
async fn duplicate_is_conflict() {
    let app = app(3);
    send(&app, enroll("bob")).await;
    let (status, body) = send(&app, enroll("bob")).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 1009);
}

#[tokio::test]
async fn health_and_openapi() {
    let app = app(3);

    let (status, body) = send(&app, Request::get("/api/v1/health").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["timestamp_ms"].as_i64().unwrap() > 0);

    let (status, doc) = send(
        &app,
        Request::get("/api-docs/openapi.json")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"].get("/users").is_some());
}
