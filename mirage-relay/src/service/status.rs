//! Status Service
//!
//! Business logic for status checks. Synthetic handles resolve locally
//! through the mock window rules; real handles go through the upstream
//! result lookup, normalize into the domain job status and render onto
//! the wire report from there.

use chrono::Utc;

use mirage_core::domain::job::{JobHandle, JobStatus};
use mirage_core::dto::status::StatusReport;

use crate::api::AppState;
use crate::mock;
use crate::upstream::{UpstreamError, UpstreamResult};

/// Service error type
#[derive(Debug)]
pub enum StatusError {
    Upstream(UpstreamError),
}

impl From<UpstreamError> for StatusError {
    fn from(err: UpstreamError) -> Self {
        StatusError::Upstream(err)
    }
}

/// Resolve the current status of a job
///
/// The returned report never carries the `error` tag; a failed observation
/// surfaces as [`StatusError`] and is rendered by the handler instead.
pub async fn check(
    state: &AppState,
    handle: &JobHandle,
    api_key: &str,
) -> Result<StatusReport, StatusError> {
    match handle {
        JobHandle::Synthetic { id, created_at } => {
            let report = mock::resolve(*id, *created_at, Utc::now());
            tracing::debug!("Resolved synthetic job {} locally", handle);
            Ok(report)
        }
        JobHandle::Real(id) => {
            let result = state.upstream.fetch_result(id, api_key).await?;
            let status = normalize(&result)?;

            if status.is_terminal() {
                tracing::info!("Job {} reached terminal status: {}", id, status);
            } else {
                tracing::debug!("Job {} still processing", id);
            }
            Ok(StatusReport::from(status))
        }
    }
}

/// Map the upstream result onto the domain job status.
///
/// Anything other than an explicit Ready or Failed counts as still
/// processing. A Ready result without an output sample is an upstream
/// contract violation, reported as a failed observation rather than a
/// finished job. Failed results keep the full upstream payload as the
/// failure detail.
fn normalize(result: &UpstreamResult) -> Result<JobStatus, UpstreamError> {
    match result.status() {
        Some("Ready") => {
            let sample = result.sample().ok_or_else(|| {
                UpstreamError::InvalidResponse(
                    "ready result did not include an output sample".to_string(),
                )
            })?;
            Ok(JobStatus::Ready {
                outputs: vec![sample.to_string()],
            })
        }
        Some("Failed") => Ok(JobStatus::Failed {
            detail: result.to_json(),
        }),
        _ => Ok(JobStatus::Processing),
    }
}
