use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use calcula_llm::{CompletionClient, CompletionError, LlmResponse};
use calcula_server::{build_router, AppState};
use tower::util::ServiceExt;

struct UnusedClient;

#[async_trait]
impl CompletionClient for UnusedClient {
    async fn complete(&self, _: &str, _: &str) -> Result<LlmResponse, CompletionError> {
        Err(CompletionError::EmptyResponse)
    }
}

fn app(index_path: PathBuf) -> Router {
    build_router(Arc::new(AppState::new(Arc::new(UnusedClient), index_path)))
}

fn shipped_index() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../static/index.html")
}

fn get_root() -> Request<Body> {
    Request::builder().uri("/").body(Body::empty()).unwrap()
}

#[tokio::test]
async fn serves_index_html() {
    let response = app(shipped_index()).oneshot(get_root()).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/html; charset=utf-8"
    );
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("/api/calcular"));
}

#[tokio::test]
async fn missing_index_is_not_found() {
    let response = app(PathBuf::from("does/not/exist.html"))
        .oneshot(get_root())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json, serde_json::json!({ "error": "Endpoint não encontrado" }));
}
