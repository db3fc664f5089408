//! Shared fixtures for the HTTP-level integration tests: an app wired to the
//! in-memory repository, plus small request/response helpers.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use api_adapters::{router, AppState};
use services::{InboxService, TripcodeGenerator};
use storage_adapters::MemoryInboxRepository;

pub const SALT: &str = "integration_salt";

/// Builds the router against a fresh in-memory repository and hands the
/// repository back for direct seeding.
pub fn test_app() -> (Router, Arc<MemoryInboxRepository>) {
    let repository = Arc::new(MemoryInboxRepository::new());
    let service = InboxService::new(repository.clone(), TripcodeGenerator::new(SALT));
    let app = router(AppState {
        service: Arc::new(service),
    });
    (app, repository)
}

/// The signature the test salt produces for these credentials.
pub fn signature_for(username: &str, secret: &str) -> String {
    TripcodeGenerator::new(SALT).generate(username, secret)
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Option<Value>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        None
    } else {
        Some(serde_json::from_slice(&bytes).unwrap())
    };
    (status, body)
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn patch_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("PATCH")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_public(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_as_owner(uri: &str, username: &str, secret: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("x-username", username)
        .header("x-secret", secret)
        .body(Body::empty())
        .unwrap()
}
