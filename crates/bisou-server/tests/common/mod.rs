//! Common test utilities for integration tests.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, Response, StatusCode},
    Router,
};
use bisou_core::{FrameStore, MemoryStore};
use bisou_server::{
    config::{Config, StorageBackend},
    routes,
    state::AppState,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

pub const BASE_URL: &str = "https://bisou.test";

/// Config with a fixed public URL and in-memory storage.
pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        public_url: Some(BASE_URL.to_string()),
        env: "test".to_string(),
        storage: StorageBackend::Memory,
        ..Config::default()
    }
}

/// Full router over a fresh memory store.
pub fn create_test_app() -> (Router, Arc<AppState>, Arc<MemoryStore>) {
    create_test_app_with(test_config())
}

pub fn create_test_app_with(config: Config) -> (Router, Arc<AppState>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = Arc::new(
        AppState::with_store(config, store.clone() as Arc<dyn FrameStore>)
            .expect("Failed to create AppState"),
    );
    (routes::router(state.clone()), state, store)
}

/// Frame action payload with only the fields clients must send.
pub fn frame_payload(fid: u64, button_index: u8, input_text: Option<&str>) -> Value {
    let mut untrusted = json!({
        "fid": fid,
        "buttonIndex": button_index,
        "messageHash": "0xabc",
        "timestamp": 1_706_243_218,
        "network": 1,
    });
    if let Some(text) = input_text {
        untrusted["inputText"] = json!(text);
    }
    json!({ "untrustedData": untrusted })
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(app: &Router, uri: &str, body: &Value) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Value of `<meta property="{property}" content="...">`, unescaped.
pub fn meta(document: &str, property: &str) -> Option<String> {
    let marker = format!(r#"property="{property}" content=""#);
    let start = document.find(&marker)? + marker.len();
    let end = start + document[start..].find('"')?;
    Some(
        document[start..end]
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&amp;", "&"),
    )
}

/// Button labels in index order.
pub fn buttons(document: &str) -> Vec<String> {
    (1..=4)
        .map_while(|i| meta(document, &format!("fc:frame:button:{i}")))
        .collect()
}

/// The document's post_url as a path relative to [`BASE_URL`].
pub fn post_path(document: &str) -> String {
    let url = meta(document, "fc:frame:post_url").expect("document has a post_url");
    url.strip_prefix(BASE_URL)
        .expect("post_url is absolute against the base URL")
        .to_string()
}

/// POST a button press and return the rendered document.
pub async fn press(
    app: &Router,
    path: &str,
    fid: u64,
    button: u8,
    input: Option<&str>,
) -> String {
    let response = post_json(app, path, &frame_payload(fid, button, input)).await;
    assert_eq!(response.status(), StatusCode::OK, "POST {path} button {button}");
    body_string(response).await
}
