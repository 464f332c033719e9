//! Integration tests for the image, health, and JSON API routes.

mod common;

use axum::http::{header, StatusCode};
use bisou_core::FrameStore;
use bisou_server::{
    config::{Config, StorageBackend},
    routes,
    state::AppState,
};
use common::*;
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;

async fn assert_svg(app: &axum::Router, uri: &str) -> String {
    let response = get(app, uri).await;
    assert_eq!(response.status(), StatusCode::OK, "{uri}");
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/svg+xml", "{uri}");
    assert_eq!(
        response.headers()[header::CACHE_CONTROL],
        "public, max-age=86400",
        "{uri}"
    );
    let svg = body_string(response).await;
    assert!(svg.starts_with("<svg width=\"1200\" height=\"630\""), "{uri}");
    svg
}

#[tokio::test]
async fn test_step_images() {
    let (app, _state, _store) = create_test_app();

    let svg = assert_svg(&app, "/frame-entry/image").await;
    assert!(svg.contains("$BISOU TOKEN"));

    let svg = assert_svg(&app, "/frame-entry/custom-amount").await;
    assert!(svg.contains("CUSTOM AMOUNT"));

    let svg = assert_svg(&app, "/frame-entry/error").await;
    assert!(svg.contains("INVALID AMOUNT"));

    let svg = assert_svg(&app, "/frame-entry/confirmation?amount=1000&cost=0.420000").await;
    assert!(svg.contains("1000 tokens"));
    assert!(svg.contains("0.420000"));

    let svg = assert_svg(&app, "/frame-entry/receipt?amount=50&cost=0.021000").await;
    assert!(svg.contains("PURCHASE COMPLETE"));
}

#[tokio::test]
async fn test_malformed_image_params_render_error_image() {
    let (app, _state, _store) = create_test_app();

    for uri in [
        "/frame-entry/confirmation",
        "/frame-entry/confirmation?amount=abc&cost=0.1",
        "/frame-entry/confirmation?amount=1000&cost=9.999999",
        "/frame-entry/receipt?amount=0",
        "/frame-entry/confirmation?amount=1&amount=2",
        "/frame-entry/receipt?amount=5&cost=0.002100&cost=0.002100",
    ] {
        let svg = assert_svg(&app, uri).await;
        assert!(svg.contains("INVALID AMOUNT"), "{uri}");
    }
}

#[tokio::test]
async fn test_unreachable_remote_image_falls_back_to_svg() {
    let (app, _state, _store) = create_test_app_with(Config {
        token_image_url: Some("http://127.0.0.1:1/token.png".to_string()),
        image_fetch_timeout_ms: 500,
        ..test_config()
    });

    let svg = assert_svg(&app, "/frame-entry/image").await;
    assert!(svg.contains("$BISOU TOKEN"));
}

#[tokio::test]
async fn test_health() {
    let (app, _state, _store) = create_test_app();

    let response = get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], json!("ok"));
    assert_eq!(body["env"], json!("test"));
    assert!(body["timestamp"].as_str().unwrap().contains('T'));
}

#[tokio::test]
async fn test_root_redirects_to_app() {
    let (app, _state, _store) = create_test_app();

    let response = get(&app, "/").await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers()[header::LOCATION], "/app");

    let response = get(&app, "/app").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("/api/quote"));
    assert!(html.contains("/api/purchases"));
    // Quote responses for a superseded selection are dropped.
    assert!(html.contains("if (state.requested !== amount) return;"));
}

#[tokio::test]
async fn test_token_info() {
    let (app, _state, _store) = create_test_app();

    let body = body_json(get(&app, "/api/token").await).await;
    assert_eq!(body["symbol"], json!("$BISOU"));
    assert_eq!(body["network"], json!("Base"));
    assert_eq!(
        body["contractAddress"],
        json!("0x951Ed6e6e75e913494C19173C30C6D3C59CffF8F")
    );
}

#[tokio::test]
async fn test_quote() {
    let (app, _state, _store) = create_test_app();

    let body = body_json(get(&app, "/api/quote?amount=250").await).await;
    assert_eq!(body["amount"], json!(250));
    assert_eq!(body["cost"], json!("0.105000"));
    assert_eq!(body["unitPrice"], json!("0.00042"));

    for uri in ["/api/quote?amount=0", "/api/quote?amount=ten", "/api/quote"] {
        let response = get(&app, uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[tokio::test]
async fn test_web_purchase_is_logged() {
    let (app, _state, store) = create_test_app();

    let response = post_json(&app, "/api/purchases", &json!({ "amount": 500 })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["amount"], json!(500));
    assert_eq!(body["cost"], json!("0.210000"));
    assert_eq!(body["status"], json!("simulated"));

    let logged = store.interactions_for_frame("web-app").unwrap();
    assert_eq!(logged.len(), 1);
    assert_eq!(logged[0].action, "confirm_purchase");
    assert_eq!(logged[0].fid, 0);

    let response = post_json(&app, "/api/purchases", &json!({ "amount": 0 })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let response = post_json(&app, "/api/purchases", &json!({ "amount": "lots" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(store.interaction_count().unwrap(), 1);
}

#[tokio::test]
async fn test_unknown_frame_state_is_not_found() {
    let (app, _state, _store) = create_test_app();

    let response = get(&app, "/api/frames/deadbeef/state").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(get(&app, "/api/frames/deadbeef/interactions").await).await;
    assert_eq!(body["interactions"], json!([]));
}

#[tokio::test]
async fn test_sqlite_backed_state_persists_interactions() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("data").join("frames.db");
    let config = Config {
        storage: StorageBackend::Sqlite,
        db_path: db_path.clone(),
        ..test_config()
    };

    let state = Arc::new(AppState::new(config.clone()).expect("Failed to create AppState"));
    let app = routes::router(state.clone());
    let response = post_json(&app, "/frame-entry/action", &frame_payload(9, 3, None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let frame_id = response.headers()["x-frame-id"].to_str().unwrap().to_string();
    drop(app);
    drop(state);

    let reopened = AppState::new(config).unwrap();
    let logged = reopened.store().interactions_for_frame(&frame_id).unwrap();
    assert_eq!(logged.len(), 1);
    assert_eq!(logged[0].action, "buy_500");
    assert_eq!(logged[0].amount, Some(500));
    assert!(db_path.exists());
}
