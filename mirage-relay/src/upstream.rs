//! Upstream inference API client
//!
//! Thin reqwest wrapper over the two upstream calls the relay forwards:
//! starting a generation and fetching its result. Timeouts are bounded per
//! request and always normalized to [`UpstreamError::Timeout`], whether
//! they happen on the wire or arrive as an upstream 504.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::RelayConfig;
use mirage_core::domain::request::GenerationRequest;

/// Upstream error type
#[derive(Debug)]
pub enum UpstreamError {
    /// The request exceeded its deadline, locally or at the gateway
    Timeout,
    /// The upstream answered with a non-2xx status
    Status { status: u16, detail: String },
    /// The request never completed
    Transport(String),
    /// The upstream answered 2xx with a body the relay cannot use
    InvalidResponse(String),
}

impl UpstreamError {
    fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Fixed parameter set forwarded with every generation request.
#[derive(Debug, Serialize)]
struct GenerationParams<'a> {
    finetune_id: &'a str,
    finetune_strength: f64,
    prompt: &'a str,
    num_images: u32,
    width: u32,
    height: u32,
    num_inference_steps: u32,
    guidance_scale: f64,
    scheduler: &'a str,
}

impl<'a> GenerationParams<'a> {
    fn for_request(request: &'a GenerationRequest) -> Self {
        Self {
            finetune_id: &request.model_id,
            finetune_strength: 1.2,
            prompt: &request.prompt,
            num_images: 1,
            width: 1024,
            height: 768,
            num_inference_steps: 30,
            guidance_scale: 7.5,
            scheduler: "DPM++ 2M Karras",
        }
    }
}

/// Acknowledgement for a started generation.
#[derive(Debug, Deserialize)]
struct SubmitAck {
    #[serde(default)]
    id: Option<String>,
}

/// Raw result payload from the upstream's result lookup.
///
/// Kept as the full JSON document: a failed generation serializes the
/// entire payload into its failure detail.
#[derive(Debug, Clone)]
pub struct UpstreamResult {
    raw: serde_json::Value,
}

impl UpstreamResult {
    /// The upstream's own status word ("Ready", "Failed", "Pending", ...)
    pub fn status(&self) -> Option<&str> {
        self.raw.get("status").and_then(|v| v.as_str())
    }

    /// Output URI of a ready generation (`result.sample`)
    pub fn sample(&self) -> Option<&str> {
        self.raw
            .get("result")
            .and_then(|r| r.get("sample"))
            .and_then(|v| v.as_str())
    }

    /// The whole payload as a JSON string, for failure diagnostics
    pub fn to_json(&self) -> String {
        self.raw.to_string()
    }
}

/// HTTP client for the upstream inference API
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    base_url: String,
    endpoint: String,
    submit_timeout: Duration,
    status_timeout: Duration,
    client: reqwest::Client,
}

impl UpstreamClient {
    /// Creates a client from the relay configuration
    pub fn new(config: &RelayConfig) -> Self {
        Self {
            base_url: config.upstream_url.trim_end_matches('/').to_string(),
            endpoint: config.upstream_endpoint.clone(),
            submit_timeout: config.submit_timeout,
            status_timeout: config.status_timeout,
            client: reqwest::Client::new(),
        }
    }

    /// Start a generation job
    ///
    /// # Arguments
    /// * `request` - The validated generation request
    ///
    /// # Returns
    /// The opaque inference id the upstream assigned to the job
    pub async fn start_generation(
        &self,
        request: &GenerationRequest,
    ) -> Result<String, UpstreamError> {
        let url = format!("{}/v1/{}", self.base_url, self.endpoint);

        let response = self
            .client
            .post(&url)
            .header("X-Key", &request.api_key)
            .json(&GenerationParams::for_request(request))
            .timeout(self.submit_timeout)
            .send()
            .await
            .map_err(UpstreamError::from_transport)?;

        let response = Self::check_status_code(response).await?;

        let ack: SubmitAck = response.json().await.map_err(|e| {
            UpstreamError::InvalidResponse(format!("unreadable submit response: {}", e))
        })?;

        match ack.id {
            Some(id) if !id.is_empty() => Ok(id),
            _ => Err(UpstreamError::InvalidResponse(
                "no inference id in response".to_string(),
            )),
        }
    }

    /// Fetch the result of a previously started job
    ///
    /// # Arguments
    /// * `id` - The inference id returned by [`Self::start_generation`]
    /// * `api_key` - The caller's upstream credential
    pub async fn fetch_result(
        &self,
        id: &str,
        api_key: &str,
    ) -> Result<UpstreamResult, UpstreamError> {
        let url = format!("{}/v1/get_result", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("id", id)])
            .header("X-Key", api_key)
            .timeout(self.status_timeout)
            .send()
            .await
            .map_err(UpstreamError::from_transport)?;

        let response = Self::check_status_code(response).await?;

        let raw: serde_json::Value = response.json().await.map_err(|e| {
            UpstreamError::InvalidResponse(format!("unreadable result response: {}", e))
        })?;

        Ok(UpstreamResult { raw })
    }

    /// Reject non-2xx responses, folding upstream 504s into the timeout class
    async fn check_status_code(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, UpstreamError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        if status == reqwest::StatusCode::GATEWAY_TIMEOUT {
            return Err(UpstreamError::Timeout);
        }

        let detail = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(UpstreamError::Status {
            status: status.as_u16(),
            detail,
        })
    }
}
