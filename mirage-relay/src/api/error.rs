//! API Error Handling
//!
//! Unified error types and conversion for API responses. Every error
//! renders the same envelope (`{error, details, status}`) with a matching
//! HTTP status code.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use mirage_core::dto::error::ErrorBody;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    /// The request is missing required fields; nothing was forwarded
    BadRequest { error: String, details: String },
    /// The upstream call exceeded its deadline
    UpstreamTimeout { details: String },
    /// The upstream rejected the call; its status code is passed through
    Upstream { status: u16, details: String },
    /// The upstream accepted the call but returned an unusable body
    InvalidUpstreamResponse { details: String },
    /// Anything else
    Internal(String),
}

impl ApiError {
    /// Rejection for a generation request with absent fields
    pub fn missing_generation_parameters() -> Self {
        Self::BadRequest {
            error: "Missing required parameters".to_string(),
            details: "Prompt, API key, and model ID are required".to_string(),
        }
    }

    /// Rejection for a status check with absent fields
    pub fn missing_status_parameters() -> Self {
        Self::BadRequest {
            error: "Missing required parameters".to_string(),
            details: "Inference ID and API key are required".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            ApiError::BadRequest { error, details } => (StatusCode::BAD_REQUEST, error, details),
            ApiError::UpstreamTimeout { details } => (
                StatusCode::GATEWAY_TIMEOUT,
                "Request timeout".to_string(),
                details,
            ),
            ApiError::Upstream { status, details } => {
                tracing::error!("Upstream error (status {}): {}", status, details);
                (
                    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                    "API request failed".to_string(),
                    details,
                )
            }
            ApiError::InvalidUpstreamResponse { details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Invalid response from API".to_string(),
                details,
            ),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to process request".to_string(),
                    msg,
                )
            }
        };

        let body = ErrorBody::new(error, details, status.as_u16());
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
