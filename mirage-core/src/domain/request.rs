//! Generation request domain type

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One text-to-image generation request as collected from the caller.
///
/// Built per submission and dropped once the relay has forwarded it;
/// nothing in the system persists these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Free-form description of the desired image.
    pub prompt: String,
    /// Upstream API credential, forwarded verbatim and never logged.
    pub api_key: String,
    /// Finetuned model identifier the upstream should generate with.
    pub model_id: String,
}

/// Why a generation request was rejected before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("prompt must not be empty")]
    EmptyPrompt,
    #[error("API key is missing")]
    MissingApiKey,
    #[error("model ID is missing")]
    MissingModelId,
}

impl GenerationRequest {
    pub fn new(
        prompt: impl Into<String>,
        api_key: impl Into<String>,
        model_id: impl Into<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            api_key: api_key.into(),
            model_id: model_id.into(),
        }
    }

    /// Checks the request locally, before anything reaches the network.
    ///
    /// A prompt consisting only of whitespace counts as empty; credentials
    /// are checked for presence, not validity.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.prompt.trim().is_empty() {
            return Err(ValidationError::EmptyPrompt);
        }
        if self.api_key.is_empty() {
            return Err(ValidationError::MissingApiKey);
        }
        if self.model_id.is_empty() {
            return Err(ValidationError::MissingModelId);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_request_passes_validation() {
        let request = GenerationRequest::new("a lighthouse at dusk", "key-123", "model-7");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn whitespace_only_prompt_is_rejected() {
        let request = GenerationRequest::new("   \t\n", "key-123", "model-7");
        assert_eq!(request.validate(), Err(ValidationError::EmptyPrompt));
    }

    #[test]
    fn missing_credentials_are_rejected_in_order() {
        let no_key = GenerationRequest::new("a lighthouse", "", "model-7");
        assert_eq!(no_key.validate(), Err(ValidationError::MissingApiKey));

        let no_model = GenerationRequest::new("a lighthouse", "key-123", "");
        assert_eq!(no_model.validate(), Err(ValidationError::MissingModelId));
    }
}
