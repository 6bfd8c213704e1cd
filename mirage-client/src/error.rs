//! Error types for the Mirage client

use mirage_core::domain::request::ValidationError;
use mirage_core::dto::error::ErrorBody;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the Mirage client
#[derive(Debug, Error)]
pub enum ClientError {
    /// Request rejected locally, before any network call
    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationError),

    /// HTTP request failed in transit
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Relay returned an error envelope
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the relay
        message: String,
        /// Additional diagnostic detail, possibly empty
        detail: String,
    },

    /// Failed to parse a relay response
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Missing or invalid local configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
            detail: String::new(),
        }
    }

    /// Interpret a non-2xx relay body.
    ///
    /// The relay's error envelope is `{error, details, status}`; anything
    /// that does not parse as that shape is kept verbatim as the message.
    pub fn from_error_body(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(envelope) => Self::Api {
                status,
                message: envelope.error,
                detail: envelope.details,
            },
            Err(_) => {
                let trimmed = body.trim();
                let message = if trimmed.is_empty() {
                    "Unknown error".to_string()
                } else {
                    trimmed.to_string()
                };
                Self::Api {
                    status,
                    message,
                    detail: String::new(),
                }
            }
        }
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Api { status, .. } if *status >= 400 && *status < 500)
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Api { status, .. } if *status >= 500)
    }

    /// Check if retrying the same call later could succeed.
    ///
    /// Validation and configuration problems are permanent until the caller
    /// changes something; transport faults and gateway-class statuses are
    /// worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Validation(_) | Self::Config(_) => false,
            Self::Transport(_) | Self::Parse(_) => true,
            Self::Api { status, .. } => matches!(status, 429 | 500 | 502 | 503 | 504),
        }
    }

    /// Render the single human-readable explanation shown to the requester.
    ///
    /// Upstream HTTP statuses each get specific wording; everything else
    /// falls back to the relay's own message when it has one.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(ValidationError::EmptyPrompt) => {
                "Please enter a prompt first.".to_string()
            }
            Self::Validation(ValidationError::MissingApiKey) => {
                "API key is not configured. Run the setup and try again.".to_string()
            }
            Self::Validation(ValidationError::MissingModelId) => {
                "Model ID is not configured. Run the setup and try again.".to_string()
            }
            Self::Api { status, message, detail } => match status {
                400 => "Invalid request. Please check your prompt and model ID.".to_string(),
                401 => "Invalid API key. Please check your MIRAGE_API_KEY.".to_string(),
                403 => "Access denied. Your API key doesn't have permission to use this service."
                    .to_string(),
                404 => "API endpoint not found. The service may have changed.".to_string(),
                429 => "Rate limit exceeded. Please try again later.".to_string(),
                500 => "Server error. The image generation service is currently unavailable."
                    .to_string(),
                504 => "Request timed out. The image generation service took too long to respond."
                    .to_string(),
                _ if !detail.is_empty() => format!("{message}: {detail}"),
                _ if !message.is_empty() => message.clone(),
                _ => "Failed to generate image. Please try again.".to_string(),
            },
            Self::Transport(e) if e.is_timeout() => {
                "Request timed out. The image generation service took too long to respond."
                    .to_string()
            }
            Self::Transport(_) => {
                "Network error. Please check your connection and try again.".to_string()
            }
            Self::Parse(_) => "Received an unexpected response. Please try again.".to_string(),
            Self::Config(message) => message.clone(),
        }
    }
}
