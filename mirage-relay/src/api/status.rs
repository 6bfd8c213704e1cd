//! Status API Handler
//!
//! Resolves the current state of a job handle. The HTTP status code
//! follows the report: processing and ready ride on 200, a dead job on
//! 500, and a failed observation on whatever code the failure carries.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};

use mirage_core::domain::job::JobHandle;
use mirage_core::dto::status::{StatusRequest, StatusReport};

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult};
use crate::service::status_service::{self, StatusError};
use crate::upstream::UpstreamError;

/// POST /api/check-status
/// Report the current status of a generation job
pub async fn check_status(
    State(state): State<Arc<AppState>>,
    Json(body): Json<StatusRequest>,
) -> ApiResult<(StatusCode, Json<StatusReport>)> {
    if body.inference_id.is_empty() || body.api_key.is_empty() {
        return Err(ApiError::missing_status_parameters());
    }

    // The only place the wire string becomes a typed handle.
    let handle = JobHandle::from(body.inference_id);
    tracing::debug!("Checking status for job: {}", handle);

    let (code, report) = match status_service::check(&state, &handle, &body.api_key).await {
        Ok(report) => (report_status_code(&report), report),
        Err(StatusError::Upstream(e)) => failed_observation(e),
    };

    Ok((code, Json(report)))
}

/// HTTP status code that accompanies each report variant.
fn report_status_code(report: &StatusReport) -> StatusCode {
    match report {
        StatusReport::Processing { .. } | StatusReport::Ready { .. } => StatusCode::OK,
        StatusReport::Failed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        StatusReport::Error { status_code, .. } => status_code
            .and_then(|code| StatusCode::from_u16(code).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// Render a failed observation as an `error` report.
///
/// Observation failures keep the report shape so pollers can parse them,
/// count them against their retry budget, and keep polling. A timeout
/// keeps its 504 so callers can tell it from an upstream fault.
fn failed_observation(err: UpstreamError) -> (StatusCode, StatusReport) {
    let (code, error, details) = match err {
        UpstreamError::Timeout => (
            StatusCode::GATEWAY_TIMEOUT,
            "Status check timeout",
            "The status check timed out. Please try again.".to_string(),
        ),
        UpstreamError::Status { status, detail } => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            "Status check failed",
            detail,
        ),
        UpstreamError::Transport(msg) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "Status check failed", msg)
        }
        UpstreamError::InvalidResponse(msg) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "Status check failed", msg)
        }
    };

    tracing::warn!("Status observation failed ({}): {}", code, details);

    let report = StatusReport::Error {
        error: error.to_string(),
        details,
        status_code: Some(code.as_u16()),
    };
    (code, report)
}
