//! API error types and conversions

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use geoasset_core::IngestError;
use serde::Serialize;

/// Message returned for every 500 response
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// API error type that converts to HTTP responses
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request
    BadRequest(String),
    /// 413 Payload Too Large
    PayloadTooLarge(String),
    /// 500 Internal Server Error (detail is logged, never returned)
    Internal(String),
}

/// Standard error response format
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => {
                tracing::debug!(%msg, "API client error");
                (StatusCode::BAD_REQUEST, msg)
            }
            ApiError::PayloadTooLarge(detail) => {
                tracing::debug!(%detail, "Upload exceeds body limit");
                (StatusCode::PAYLOAD_TOO_LARGE, "Payload too large".to_string())
            }
            ApiError::Internal(detail) => {
                tracing::error!(%detail, "API error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<IngestError> for ApiError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::Validation(err) => {
                if let Some(detail) = err.detail() {
                    tracing::debug!(%detail, "Upload rejected");
                }
                ApiError::BadRequest(err.to_string())
            }
            IngestError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(err.body_text())
        } else {
            ApiError::Internal(format!("Failed to read multipart body: {}", err.body_text()))
        }
    }
}
