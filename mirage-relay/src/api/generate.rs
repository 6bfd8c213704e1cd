//! Generation API Handler
//!
//! Accepts a generation request, relays it, and answers with the job
//! handle the caller will poll. Holds no state about the job afterward.

use std::sync::Arc;

use axum::{Json, extract::State};

use mirage_core::domain::request::GenerationRequest;
use mirage_core::dto::generate::{SubmitRequest, SubmitResponse};

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult};
use crate::service::generate_service::{self, GenerateError};
use crate::upstream::UpstreamError;

/// Marks a field as present or missing without echoing its value.
/// Keeps prompts and credentials out of the logs.
fn presence(value: &str) -> &'static str {
    if value.is_empty() { "missing" } else { "present" }
}

/// POST /api/generate
/// Validate the request and start a generation job
pub async fn submit_generation(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SubmitRequest>,
) -> ApiResult<Json<SubmitResponse>> {
    tracing::info!(
        "Received generation request (prompt: {}, api_key: {}, model_id: {})",
        presence(&body.prompt),
        presence(&body.api_key),
        presence(&body.model_id),
    );

    let request = GenerationRequest::from(body);

    let accepted = generate_service::submit(&state, request)
        .await
        .map_err(|e| match e {
            GenerateError::Validation(_) => ApiError::missing_generation_parameters(),
            GenerateError::Upstream(UpstreamError::Timeout) => ApiError::UpstreamTimeout {
                details: "The image generation request timed out. Please try again.".to_string(),
            },
            GenerateError::Upstream(UpstreamError::Status { status, detail }) => {
                ApiError::Upstream {
                    status,
                    details: detail,
                }
            }
            GenerateError::Upstream(UpstreamError::InvalidResponse(_)) => {
                ApiError::InvalidUpstreamResponse {
                    details: "No inference ID received".to_string(),
                }
            }
            GenerateError::Upstream(UpstreamError::Transport(msg)) => ApiError::Internal(msg),
        })?;

    Ok(Json(accepted))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use crate::config::RelayConfig;

    fn mock_state() -> Arc<AppState> {
        Arc::new(AppState::new(RelayConfig {
            use_mock_upstream: true,
            mock_submit_delay: Duration::from_millis(0),
            ..RelayConfig::default()
        }))
    }

    fn body(prompt: &str, api_key: &str, model_id: &str) -> SubmitRequest {
        SubmitRequest {
            prompt: prompt.to_string(),
            api_key: api_key.to_string(),
            model_id: model_id.to_string(),
        }
    }

    #[tokio::test]
    async fn test_rejects_incomplete_requests_with_one_envelope() {
        let state = mock_state();

        for incomplete in [
            body("", "key", "model"),
            body("a prompt", "", "model"),
            body("a prompt", "key", ""),
        ] {
            let err = submit_generation(State(Arc::clone(&state)), Json(incomplete))
                .await
                .unwrap_err();

            match err {
                ApiError::BadRequest { error, details } => {
                    assert_eq!(error, "Missing required parameters");
                    assert_eq!(details, "Prompt, API key, and model ID are required");
                }
                other => panic!("expected bad request, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_mock_submission_acknowledges_with_a_pollable_handle() {
        let state = mock_state();

        let Json(accepted) =
            submit_generation(State(state), Json(body("a quiet harbor", "key", "model")))
                .await
                .unwrap();

        assert!(accepted.inference_id.is_synthetic());
        assert_eq!(accepted.status, "processing");
    }

    #[tokio::test]
    async fn test_upstream_rejections_keep_their_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/flux-pro-1.1-ultra-finetuned")
            .with_status(403)
            .with_body("Forbidden")
            .create_async()
            .await;

        let state = Arc::new(AppState::new(RelayConfig {
            upstream_url: server.url(),
            ..RelayConfig::default()
        }));

        let err = submit_generation(State(state), Json(body("a quiet harbor", "bad-key", "model")))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Upstream { status: 403, .. }));
    }

    #[test]
    fn test_presence_never_echoes_the_value() {
        assert_eq!(presence("sk-secret"), "present");
        assert_eq!(presence(""), "missing");
    }
}
