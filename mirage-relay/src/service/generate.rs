//! Generation Service
//!
//! Business logic for job submission: local validation, then either the
//! mock path or a real upstream call.

use mirage_core::domain::job::JobHandle;
use mirage_core::domain::request::{GenerationRequest, ValidationError};
use mirage_core::dto::generate::SubmitResponse;

use crate::api::AppState;
use crate::upstream::UpstreamError;

/// Service error type
#[derive(Debug)]
pub enum GenerateError {
    Validation(ValidationError),
    Upstream(UpstreamError),
}

impl From<ValidationError> for GenerateError {
    fn from(err: ValidationError) -> Self {
        GenerateError::Validation(err)
    }
}

impl From<UpstreamError> for GenerateError {
    fn from(err: UpstreamError) -> Self {
        GenerateError::Upstream(err)
    }
}

/// Validate and submit a generation request
///
/// In mock mode no upstream call is made; a synthetic handle is minted
/// after an artificial delay and the caller polls it like any other job.
pub async fn submit(
    state: &AppState,
    request: GenerationRequest,
) -> Result<SubmitResponse, GenerateError> {
    request.validate()?;

    if state.config.use_mock_upstream {
        // Hold the acknowledgement briefly so callers exercise their
        // pending state the same way they would against the upstream.
        tokio::time::sleep(state.config.mock_submit_delay).await;

        let handle = JobHandle::synthetic();
        tracing::info!("Synthesized mock job: {}", handle);
        return Ok(SubmitResponse::started(handle));
    }

    let id = state.upstream.start_generation(&request).await?;
    tracing::info!("Upstream accepted generation job: {}", id);

    Ok(SubmitResponse::started(JobHandle::real(id)))
}
