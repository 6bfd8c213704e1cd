//! Submission DTOs

use serde::{Deserialize, Serialize};

use crate::domain::job::JobHandle;
use crate::domain::request::GenerationRequest;

/// Request body for `POST /api/generate`.
///
/// Fields default to empty strings so an absent field and an empty one are
/// rejected identically by validation instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub model_id: String,
}

impl From<GenerationRequest> for SubmitRequest {
    fn from(request: GenerationRequest) -> Self {
        Self {
            prompt: request.prompt,
            api_key: request.api_key,
            model_id: request.model_id,
        }
    }
}

impl From<SubmitRequest> for GenerationRequest {
    fn from(body: SubmitRequest) -> Self {
        Self {
            prompt: body.prompt,
            api_key: body.api_key,
            model_id: body.model_id,
        }
    }
}

/// Success body for `POST /api/generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    /// Handle the caller polls with; serialized as a plain string.
    pub inference_id: JobHandle,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SubmitResponse {
    /// Envelope for a freshly accepted job.
    pub fn started(inference_id: JobHandle) -> Self {
        Self {
            inference_id,
            status: "processing".to_string(),
            message: Some("Image generation started".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_request_tolerates_missing_fields() {
        let body: SubmitRequest = serde_json::from_str(r#"{"prompt":"a fox"}"#).unwrap();

        assert_eq!(body.prompt, "a fox");
        assert!(body.api_key.is_empty());
        assert!(body.model_id.is_empty());
    }

    #[test]
    fn submit_request_uses_camel_case_on_the_wire() {
        let body: SubmitRequest = serde_json::from_str(
            r#"{"prompt":"a fox","apiKey":"key","modelId":"model"}"#,
        )
        .unwrap();

        assert_eq!(body.api_key, "key");
        assert_eq!(body.model_id, "model");
    }

    #[test]
    fn submit_response_serializes_the_handle_as_a_string() {
        let response = SubmitResponse::started(JobHandle::real("inf-42"));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["inferenceId"], "inf-42");
        assert_eq!(json["status"], "processing");
        assert_eq!(json["message"], "Image generation started");
    }
}
