//! API error types with JSON `{"error": "..."}` responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::prediction::PredictionError;

/// Error response body. Clients read the single `error` string.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Upload too large: {0}")]
    PayloadTooLarge(String),
    /// Decode or inference failure; the message reaches the client as-is.
    #[error("Inference failed: {0}")]
    Inference(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(detail) => {
                tracing::debug!(detail = %detail, "Rejected request");
                (StatusCode::BAD_REQUEST, detail)
            }
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, detail),
            ApiError::PayloadTooLarge(detail) => {
                tracing::warn!(detail = %detail, "Upload rejected by size limit");
                (StatusCode::PAYLOAD_TOO_LARGE, detail)
            }
            ApiError::Inference(detail) => {
                tracing::error!(detail = %detail, "Prediction failed");
                (StatusCode::INTERNAL_SERVER_ERROR, detail)
            }
            ApiError::Internal(detail) => {
                tracing::error!(detail = %detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<PredictionError> for ApiError {
    fn from(err: PredictionError) -> Self {
        ApiError::Inference(err.to_string())
    }
}

impl From<axum::extract::multipart::MultipartError> for ApiError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(err.body_text())
        } else {
            ApiError::BadRequest(format!("Malformed upload: {}", err.body_text()))
        }
    }
}
