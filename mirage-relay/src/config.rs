//! Relay configuration
//!
//! All timeouts and the upstream location are configurable through the
//! environment so the relay can be pointed at a staging upstream or run
//! entirely in mock mode without a rebuild.

use std::time::Duration;

/// Relay configuration
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Address the HTTP server binds to
    pub bind_addr: String,

    /// Base URL of the upstream inference API
    pub upstream_url: String,

    /// Generation endpoint name under `/v1/` on the upstream
    pub upstream_endpoint: String,

    /// Timeout for the initial generation request
    pub submit_timeout: Duration,

    /// Timeout for result lookups
    pub status_timeout: Duration,

    /// When set, bypass the upstream entirely and simulate responses
    pub use_mock_upstream: bool,

    /// Artificial delay before a mock submission is acknowledged
    pub mock_submit_delay: Duration,
}

impl RelayConfig {
    /// Creates configuration from environment variables
    ///
    /// Expected environment variables (all optional):
    /// - RELAY_BIND_ADDR (default: 0.0.0.0:8080)
    /// - UPSTREAM_URL (default: https://api.us1.bfl.ai)
    /// - UPSTREAM_ENDPOINT (default: flux-pro-1.1-ultra-finetuned)
    /// - SUBMIT_TIMEOUT_SECS (default: 10)
    /// - STATUS_TIMEOUT_SECS (default: 5)
    /// - USE_MOCK_UPSTREAM (default: false)
    /// - MOCK_SUBMIT_DELAY_MS (default: 2000)
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr =
            std::env::var("RELAY_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let upstream_url =
            std::env::var("UPSTREAM_URL").unwrap_or_else(|_| "https://api.us1.bfl.ai".to_string());

        let upstream_endpoint = std::env::var("UPSTREAM_ENDPOINT")
            .unwrap_or_else(|_| "flux-pro-1.1-ultra-finetuned".to_string());

        let submit_timeout = std::env::var("SUBMIT_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(10));

        let status_timeout = std::env::var("STATUS_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(5));

        let use_mock_upstream = std::env::var("USE_MOCK_UPSTREAM")
            .map(|s| s.eq_ignore_ascii_case("true") || s == "1")
            .unwrap_or(false);

        let mock_submit_delay = std::env::var("MOCK_SUBMIT_DELAY_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_millis(2000));

        let config = Self {
            bind_addr,
            upstream_url,
            upstream_endpoint,
            submit_timeout,
            status_timeout,
            use_mock_upstream,
            mock_submit_delay,
        };
        config.validate()?;

        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.bind_addr.is_empty() {
            anyhow::bail!("bind_addr cannot be empty");
        }

        if !self.upstream_url.starts_with("http://") && !self.upstream_url.starts_with("https://") {
            anyhow::bail!("upstream_url must start with http:// or https://");
        }

        if self.upstream_endpoint.is_empty() {
            anyhow::bail!("upstream_endpoint cannot be empty");
        }

        if self.submit_timeout.is_zero() || self.status_timeout.is_zero() {
            anyhow::bail!("upstream timeouts must be greater than 0");
        }

        Ok(())
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            upstream_url: "https://api.us1.bfl.ai".to_string(),
            upstream_endpoint: "flux-pro-1.1-ultra-finetuned".to_string(),
            submit_timeout: Duration::from_secs(10),
            status_timeout: Duration::from_secs(5),
            use_mock_upstream: false,
            mock_submit_delay: Duration::from_millis(2000),
        }
    }
}
