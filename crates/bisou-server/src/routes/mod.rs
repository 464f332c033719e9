//! HTTP route handlers.

pub mod api;
pub mod app;
pub mod frame;
pub mod images;

use crate::state::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub env: String,
    pub version: &'static str,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now(),
        env: state.config.env.clone(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// All application routes, without middleware layers.
pub fn router(state: Arc<AppState>) -> Router {
    let frame_routes = Router::new()
        .route("/action", post(frame::action_initial))
        .route("/action/{step}", post(frame::action_step))
        .route("/image", get(images::initial))
        .route("/custom-amount", get(images::custom_amount))
        .route("/confirmation", get(images::confirmation))
        .route("/error", get(images::error))
        .route("/receipt", get(images::receipt));

    let api_routes = Router::new()
        .route("/token", get(api::token))
        .route("/quote", get(api::quote))
        .route("/purchases", post(api::purchase))
        .route("/frames/{frame_id}/interactions", get(api::frame_interactions))
        .route("/frames/{frame_id}/state", get(api::frame_state));

    Router::new()
        .route("/", get(app::root))
        .route("/app", get(app::index))
        .route("/health", get(health))
        .route("/frame-entry", get(frame::entry))
        .nest("/frame-entry", frame_routes)
        .nest("/api", api_routes)
        .with_state(state)
}
