//! Farcaster Frame document and action routes.
//!
//! The frame is stateless. Each rendered document points its buttons at a
//! post-back URL naming the step it was rendered for, plus the amount where
//! one applies, so an action request carries everything needed to compute
//! the next step.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, HeaderMap, HeaderName},
    response::{Html, IntoResponse, Response},
    Json,
};
use bisou_core::{
    broken_continuation, render_document, simulate_purchase, transition, FrameView, Step,
    StepKind,
};
use bisou_types::FrameMessage;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Response header naming the frame id an action was logged under.
pub const FRAME_ID_HEADER: HeaderName = HeaderName::from_static("x-frame-id");

/// Data carried forward in a post-back URL.
#[derive(Debug, Default, Deserialize)]
pub struct ContinuationQuery {
    #[serde(default)]
    pub amount: Option<String>,
}

/// GET /frame-entry - Initial frame document.
pub async fn entry(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Html<String> {
    let base_url = resolve_base_url(&state, &headers);
    Html(render_document(&FrameView::for_step(Step::Initial), &base_url))
}

/// POST /frame-entry/action - Button press on the initial step.
pub async fn action_initial(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<FrameMessage>, JsonRejection>,
) -> Result<Response, ApiError> {
    handle_action(&state, StepKind::Initial, Some(Step::Initial), &headers, payload)
}

/// POST /frame-entry/action/{step} - Button press on any later step.
///
/// A query string that does not deserialize counts as a missing amount.
pub async fn action_step(
    State(state): State<Arc<AppState>>,
    path: Result<Path<StepKind>, PathRejection>,
    query: Result<Query<ContinuationQuery>, QueryRejection>,
    headers: HeaderMap,
    payload: Result<Json<FrameMessage>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Path(kind) = path.map_err(|rejection| {
        warn!(target: "bisou::frame", "Rejected post-back path: {}", rejection.body_text());
        ApiError::UnknownStep
    })?;
    let query = query.map(|Query(q)| q).unwrap_or_else(|rejection| {
        debug!(target: "bisou::frame", "Ignoring post-back query: {}", rejection.body_text());
        ContinuationQuery::default()
    });

    let step = Step::resume(kind, query.amount.as_deref());
    handle_action(&state, kind, step, &headers, payload)
}

/// Apply a press to the step the post-back URL named.
///
/// `step` is `None` when the URL named an amount-bearing step without a
/// usable amount; the press then lands on the error step.
fn handle_action(
    state: &AppState,
    kind: StepKind,
    step: Option<Step>,
    headers: &HeaderMap,
    payload: Result<Json<FrameMessage>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(message) = payload.map_err(|rejection| {
        warn!(target: "bisou::frame", "Rejected frame message: {}", rejection.body_text());
        ApiError::InvalidFrameMessage
    })?;
    let data = &message.untrusted_data;

    let next = match step {
        Some(step) => transition(step, data.button_index, data.input()),
        None => broken_continuation(kind, data.button_index),
    }
    .map_err(|e| {
        warn!(target: "bisou::frame", "{}", e);
        ApiError::InvalidButton
    })?;

    let frame_id = Uuid::new_v4().simple().to_string();
    state
        .interactions
        .record_transition(&frame_id, data.fid, &next);

    if next.is_purchase() {
        if let Some(amount) = next.amount {
            simulate_purchase(amount);
        }
    }

    info!(
        target: "bisou::frame",
        "fid {} pressed {} on {}: {} -> {}",
        data.fid,
        data.button_index,
        step.map(|s| s.label()).unwrap_or_else(|| format!("{kind} (no amount)")),
        next.action.label(),
        next.next.label()
    );

    let base_url = resolve_base_url(state, headers);
    let document = render_document(&FrameView::for_step(next.next), &base_url);
    Ok(([(FRAME_ID_HEADER, frame_id)], Html(document)).into_response())
}

/// Base URL for absolute links in frame meta tags, without trailing slash.
///
/// Prefers the configured public URL, then proxy headers, then `Host`.
pub fn resolve_base_url(state: &AppState, headers: &HeaderMap) -> String {
    if let Some(url) = state.config.public_base_url() {
        return url.to_string();
    }

    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    let scheme = match header_value("x-forwarded-proto") {
        Some(proto) if proto.eq_ignore_ascii_case("https") => "https",
        _ => "http",
    };

    if let Some(host) = header_value("x-forwarded-host").or_else(|| header_value(header::HOST.as_str())) {
        return format!("{scheme}://{host}");
    }

    debug!(target: "bisou::frame", "No host header, falling back to configured address");
    let host = match state.config.host.as_str() {
        "0.0.0.0" | "::" => "localhost",
        other => other,
    };
    format!("http://{}:{}", host, state.config.port)
}
