//! HTTP error responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bisou_core::BisouError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid frame message format")]
    InvalidFrameMessage,

    #[error("Invalid button index")]
    InvalidButton,

    #[error("Unknown frame step")]
    UnknownStep,

    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Invalid request body")]
    InvalidBody,

    #[error("Not found")]
    NotFound,

    #[error("Internal error: {0}")]
    Internal(#[from] BisouError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidFrameMessage
            | ApiError::InvalidButton
            | ApiError::UnknownStep
            | ApiError::InvalidAmount
            | ApiError::InvalidBody => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(e) = &self {
            tracing::error!(target: "bisou::api", "Request failed: {}", e);
        }
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
