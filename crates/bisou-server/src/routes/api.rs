//! JSON API used by the browser app.

use crate::error::ApiError;
use crate::interaction_logger::WEB_APP_FRAME_ID;
use crate::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use bisou_core::{parse_amount, simulate_purchase, Action, PurchaseReceipt, Quote};
use bisou_types::{FrameInteraction, FrameState, TokenInfo, BISOU};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// GET /api/token - Static token metadata.
pub async fn token() -> Json<TokenInfo> {
    Json(BISOU)
}

#[derive(Deserialize)]
pub struct QuoteQuery {
    pub amount: String,
}

/// GET /api/quote?amount=N - Price an amount of tokens.
pub async fn quote(
    query: Result<Query<QuoteQuery>, QueryRejection>,
) -> Result<Json<Quote>, ApiError> {
    let Query(query) = query.map_err(|_| ApiError::InvalidAmount)?;
    let amount = parse_amount(&query.amount).map_err(|_| ApiError::InvalidAmount)?;
    Ok(Json(Quote::for_amount(amount)))
}

#[derive(Deserialize)]
pub struct PurchaseRequest {
    pub amount: u64,
    /// Farcaster id when the app runs inside a Farcaster client.
    #[serde(default)]
    pub fid: Option<u64>,
}

/// POST /api/purchases - Simulated purchase from the browser app.
pub async fn purchase(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PurchaseRequest>, JsonRejection>,
) -> Result<Json<PurchaseReceipt>, ApiError> {
    let Json(request) = payload.map_err(|_| ApiError::InvalidBody)?;
    if request.amount == 0 {
        return Err(ApiError::InvalidAmount);
    }

    let receipt = simulate_purchase(request.amount);
    state.interactions.record(
        WEB_APP_FRAME_ID,
        request.fid.unwrap_or_default(),
        &Action::ConfirmPurchase.label(),
        Some(request.amount),
    );
    Ok(Json(receipt))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionsResponse {
    pub frame_id: String,
    pub interactions: Vec<FrameInteraction>,
}

/// GET /api/frames/{frame_id}/interactions - Audit log for one frame.
pub async fn frame_interactions(
    State(state): State<Arc<AppState>>,
    Path(frame_id): Path<String>,
) -> Result<Json<InteractionsResponse>, ApiError> {
    let interactions = state.store().interactions_for_frame(&frame_id)?;
    Ok(Json(InteractionsResponse {
        frame_id,
        interactions,
    }))
}

/// GET /api/frames/{frame_id}/state - Latest step recorded for a frame.
pub async fn frame_state(
    State(state): State<Arc<AppState>>,
    Path(frame_id): Path<String>,
) -> Result<Json<FrameState>, ApiError> {
    state
        .store()
        .frame_state(&frame_id)?
        .map(Json)
        .ok_or(ApiError::NotFound)
}
