use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::Duration;
use roombook_auth::{routes, AuthState, LocalIdentityProvider, TokenIssuer};
use roombook_db::{DbClientFactory, SqlAccountRepository};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn app() -> Router {
    let client = DbClientFactory::new()
        .from_url("sqlite::memory:", &[])
        .await
        .expect("in-memory database");
    let provider = LocalIdentityProvider::new(
        SqlAccountRepository::new(client),
        TokenIssuer::new("test-secret", Duration::hours(1)),
        6,
    );
    routes(AuthState {
        identity: Arc::new(provider),
    })
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn with_bearer(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_register_login_profile_logout_flow() {
    let app = app().await;

    let (status, body) = send(
        &app,
        post_json(
            "/auth/register",
            json!({"email": "ana@example.com", "password": "hunter22", "fullName": "Ana Martin"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["fullName"], "Ana Martin");
    assert!(body["token"].as_str().is_some());

    let (status, body) = send(
        &app,
        post_json("/auth/login", json!({"email": "ana@example.com", "password": "hunter22"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = send(&app, with_bearer("GET", "/auth/profile", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "ana@example.com");

    let (status, _) = send(&app, with_bearer("POST", "/auth/logout", &token)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, with_bearer("GET", "/auth/profile", &token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], 401);
}

#[tokio::test]
async fn test_register_rejects_bad_input() {
    let app = app().await;

    let (status, _) = send(&app, post_json("/auth/register", json!({"email": "ana@example.com"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let request = Request::builder()
        .method("POST")
        .uri("/auth/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 400);
}

#[tokio::test]
async fn test_wrong_password_and_missing_token_are_unauthorized() {
    let app = app().await;
    send(
        &app,
        post_json("/auth/register", json!({"email": "ana@example.com", "password": "hunter22"})),
    )
    .await;

    let (status, _) = send(
        &app,
        post_json("/auth/login", json!({"email": "ana@example.com", "password": "nope-nope"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let request = Request::builder()
        .uri("/auth/profile")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, with_bearer("GET", "/auth/profile", "garbage")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
