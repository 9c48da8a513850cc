//! Test utilities for integration tests
use std::sync::{Arc, RwLock};

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::Value;
use tower::util::ServiceExt;

use studytools::api::{AppState, app};
use studytools::core::AppConfig;

/// A config that points at nothing in particular; tests that exercise a
/// backend swap in a mock server URL.
pub fn test_config() -> AppConfig {
    AppConfig {
        calendar_api_url: String::from("http://localhost:8000"),
        anthropic_api_url: String::from("https://api.anthropic.com"),
        anthropic_api_key: String::from("test-api-key"),
        anthropic_model: String::from("claude-test"),
        web_ui_path: String::from("./web-ui"),
    }
}

pub fn test_app(config: AppConfig) -> Router {
    app(Arc::new(RwLock::new(AppState::new(config))))
}

/// POST a JSON body and return the response status and parsed body.
pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}
