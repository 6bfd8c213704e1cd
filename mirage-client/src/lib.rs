//! Mirage HTTP Client
//!
//! A simple, type-safe client for the Mirage relay API, plus the polling
//! session that drives a generation job from submission to its terminal
//! state.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use mirage_client::{Generator, PollConfig, RelayClient};
//! use mirage_core::domain::request::GenerationRequest;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = RelayClient::new("http://localhost:8080");
//!     let mut generator = Generator::new(Arc::new(client), PollConfig::default())?;
//!
//!     let request = GenerationRequest::new("a lighthouse at dusk", "key", "model-7");
//!     let handle = generator.submit(request).await?;
//!     println!("Submitted job {handle}");
//!
//!     if let Some(outcome) = generator.wait().await {
//!         println!("Outcome: {outcome:?}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
mod generation;
pub mod session;

// Re-export commonly used types
pub use config::{Credentials, PollConfig};
pub use error::{ClientError, Result};
pub use session::{GenerationSession, Generator, PollOutcome, RelayApi};

use mirage_core::dto::status::StatusReport;
use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the Mirage relay API
///
/// Wraps the two relay endpoints: job submission (`POST /api/generate`)
/// and status polling (`POST /api/check-status`). Cloning is cheap; the
/// underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct RelayClient {
    /// Base URL of the relay, kept without a trailing slash
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl RelayClient {
    /// Create a relay client over a default HTTP client
    ///
    /// # Example
    /// ```
    /// use mirage_client::RelayClient;
    ///
    /// let client = RelayClient::new("http://localhost:8080");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a relay client over a preconfigured `reqwest::Client`,
    /// for callers that need their own timeouts, proxy, or TLS setup
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle a relay response and deserialize JSON
    ///
    /// Non-2xx responses are interpreted through the relay's error envelope
    /// and surface as [`ClientError::Api`].
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| ClientError::Parse(format!("Failed to parse JSON response: {}", e)));
        }

        let body = response.text().await.unwrap_or_default();
        Err(ClientError::from_error_body(status.as_u16(), &body))
    }

    /// Handle a status-poll response.
    ///
    /// The status endpoint reports dead jobs on non-2xx codes but still
    /// sends a tagged body, so the body is tried as a [`StatusReport`]
    /// first regardless of the HTTP code; only an unparseable non-2xx
    /// response becomes an error.
    async fn handle_status_response(&self, response: reqwest::Response) -> Result<StatusReport> {
        let status = response.status();
        let text = response.text().await?;

        match serde_json::from_str::<StatusReport>(&text) {
            Ok(report) => Ok(report),
            Err(e) if status.is_success() => Err(ClientError::Parse(format!(
                "Failed to parse status response: {}",
                e
            ))),
            Err(_) => Err(ClientError::from_error_body(status.as_u16(), &text)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_stored() {
        let client = RelayClient::new("http://relay.local:8080");
        assert_eq!(client.base_url(), "http://relay.local:8080");
    }

    #[test]
    fn test_trailing_slashes_are_trimmed() {
        for url in ["http://relay.local:8080/", "http://relay.local:8080//"] {
            assert_eq!(RelayClient::new(url).base_url(), "http://relay.local:8080");
        }
    }

    #[test]
    fn test_custom_http_client_is_accepted() {
        let client = RelayClient::with_client("http://relay.local:8080", Client::new());
        assert_eq!(client.base_url(), "http://relay.local:8080");
    }
}
