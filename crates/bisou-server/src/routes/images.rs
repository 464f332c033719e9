//! Per-step frame images.

use crate::state::AppState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use bisou_core::{format_cost, render_svg, FrameView, Step, StepKind};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

const CACHE_CONTROL: &str = "public, max-age=86400";

/// Query for images that show an amount.
#[derive(Debug, Default, Deserialize)]
pub struct PricedImageQuery {
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub cost: Option<String>,
}

/// GET /frame-entry/image - Initial image, proxied when a remote one is configured.
pub async fn initial(State(state): State<Arc<AppState>>) -> Response {
    if let Some(image) = state.token_image.fetch().await {
        return (
            [
                (header::CONTENT_TYPE, image.content_type),
                (header::CACHE_CONTROL, CACHE_CONTROL.to_string()),
            ],
            image.bytes,
        )
            .into_response();
    }
    svg_response(Step::Initial)
}

/// GET /frame-entry/custom-amount
pub async fn custom_amount() -> Response {
    svg_response(Step::CustomAmount)
}

/// GET /frame-entry/error
pub async fn error() -> Response {
    svg_response(Step::Error)
}

/// GET /frame-entry/confirmation?amount=&cost=
pub async fn confirmation(query: Result<Query<PricedImageQuery>, QueryRejection>) -> Response {
    svg_response(priced_step(StepKind::Confirmation, query))
}

/// GET /frame-entry/receipt?amount=&cost=
pub async fn receipt(query: Result<Query<PricedImageQuery>, QueryRejection>) -> Response {
    svg_response(priced_step(StepKind::Receipt, query))
}

/// Rebuild an amount-bearing step from its image query.
///
/// A query that does not deserialize, a bad amount, or a cost that
/// disagrees with the amount all yield the error step.
fn priced_step(kind: StepKind, query: Result<Query<PricedImageQuery>, QueryRejection>) -> Step {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            debug!(target: "bisou::image", "Malformed image query: {}", rejection.body_text());
            return Step::Error;
        }
    };
    match Step::resume(kind, query.amount.as_deref()) {
        Some(step) => match (step.amount(), query.cost.as_deref()) {
            (Some(amount), Some(cost)) if cost.trim() != format_cost(amount) => Step::Error,
            _ => step,
        },
        None => Step::Error,
    }
}

fn svg_response(step: Step) -> Response {
    (
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CACHE_CONTROL, CACHE_CONTROL),
        ],
        render_svg(&FrameView::for_step(step)),
    )
        .into_response()
}
