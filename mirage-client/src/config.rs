//! Client configuration
//!
//! Polling parameters for the generation session and the credentials the
//! setup CLI writes to the environment.

use std::time::Duration;

use crate::error::{ClientError, Result};
use mirage_core::domain::request::GenerationRequest;

/// Environment variable holding the upstream API key.
pub const ENV_API_KEY: &str = "MIRAGE_API_KEY";
/// Environment variable holding the default model identifier.
pub const ENV_MODEL_ID: &str = "MIRAGE_MODEL_ID";

/// Polling loop configuration
///
/// Both values are configurable so tests can run on millisecond intervals
/// while real deployments poll every few seconds.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Delay between consecutive status polls
    pub poll_interval: Duration,

    /// How many consecutive failed observations end the session
    pub max_consecutive_errors: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(4),
            max_consecutive_errors: 3,
        }
    }
}

impl PollConfig {
    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval.is_zero() {
            return Err(ClientError::Config(
                "poll_interval must be greater than 0".to_string(),
            ));
        }
        if self.max_consecutive_errors == 0 {
            return Err(ClientError::Config(
                "max_consecutive_errors must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Upstream credentials, read once at session start
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Upstream API key; never logged
    pub api_key: String,
    /// Default finetuned model identifier
    pub model_id: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model_id: model_id.into(),
        }
    }

    /// Reads credentials from the environment
    ///
    /// Expected environment variables:
    /// - MIRAGE_API_KEY (required)
    /// - MIRAGE_MODEL_ID (required)
    ///
    /// Both are written by the setup CLI.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(ENV_API_KEY)
            .map_err(|_| ClientError::Config(format!("{ENV_API_KEY} environment variable not set")))?;
        let model_id = std::env::var(ENV_MODEL_ID)
            .map_err(|_| ClientError::Config(format!("{ENV_MODEL_ID} environment variable not set")))?;

        let credentials = Self { api_key, model_id };
        credentials.validate()?;
        Ok(credentials)
    }

    /// Validates the credentials for presence
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(ClientError::Config(format!("{ENV_API_KEY} is empty")));
        }
        if self.model_id.is_empty() {
            return Err(ClientError::Config(format!("{ENV_MODEL_ID} is empty")));
        }
        Ok(())
    }

    /// Builds a generation request for a prompt using these credentials
    pub fn request(&self, prompt: impl Into<String>) -> GenerationRequest {
        GenerationRequest::new(prompt, self.api_key.clone(), self.model_id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PollConfig::default();
        assert_eq!(config.poll_interval, Duration::from_secs(4));
        assert_eq!(config.max_consecutive_errors, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = PollConfig::default();
        assert!(config.validate().is_ok());

        config.poll_interval = Duration::ZERO;
        assert!(config.validate().is_err());

        config.poll_interval = Duration::from_millis(10);
        config.max_consecutive_errors = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_credentials_validation() {
        assert!(Credentials::new("key", "model").validate().is_ok());
        assert!(Credentials::new("", "model").validate().is_err());
        assert!(Credentials::new("key", "").validate().is_err());
    }

    #[test]
    fn test_credentials_build_requests() {
        let credentials = Credentials::new("key-1", "model-1");
        let request = credentials.request("a fox");

        assert_eq!(request.prompt, "a fox");
        assert_eq!(request.api_key, "key-1");
        assert_eq!(request.model_id, "model-1");
    }
}
