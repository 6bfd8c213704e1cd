//! Generation API endpoints

use crate::RelayClient;
use crate::error::Result;
use mirage_core::domain::job::JobHandle;
use mirage_core::domain::request::GenerationRequest;
use mirage_core::dto::generate::{SubmitRequest, SubmitResponse};
use mirage_core::dto::status::{StatusReport, StatusRequest};

impl RelayClient {
    /// Submit a generation request to the relay
    ///
    /// # Arguments
    /// * `request` - The generation request to forward
    ///
    /// # Returns
    /// The accepted job's handle and initial status
    pub async fn submit_generation(&self, request: &GenerationRequest) -> Result<SubmitResponse> {
        let url = format!("{}/api/generate", self.base_url);
        let body = SubmitRequest::from(request.clone());
        let response = self.client.post(&url).json(&body).send().await?;

        self.handle_response(response).await
    }

    /// Check the status of a previously submitted job
    ///
    /// # Arguments
    /// * `handle` - The job handle returned at submission
    /// * `api_key` - The upstream credential, forwarded with every poll
    ///
    /// # Returns
    /// The current status report, including terminal failure reports that
    /// arrive on non-2xx responses
    pub async fn check_status(&self, handle: &JobHandle, api_key: &str) -> Result<StatusReport> {
        let url = format!("{}/api/check-status", self.base_url);
        let body = StatusRequest {
            inference_id: handle.to_string(),
            api_key: api_key.to_string(),
        };
        let response = self.client.post(&url).json(&body).send().await?;

        self.handle_status_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use crate::RelayClient;
    use crate::error::ClientError;
    use mirage_core::domain::job::JobHandle;
    use mirage_core::domain::request::GenerationRequest;
    use mirage_core::dto::status::StatusReport;

    fn request() -> GenerationRequest {
        GenerationRequest::new("a lighthouse at dusk", "test-key", "model-7")
    }

    #[tokio::test]
    async fn submit_parses_the_accepted_envelope() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/generate")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "prompt": "a lighthouse at dusk",
                "apiKey": "test-key",
                "modelId": "model-7",
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"inferenceId":"inf-42","status":"processing","message":"Image generation started"}"#)
            .create_async()
            .await;

        let client = RelayClient::new(server.url());
        let accepted = client.submit_generation(&request()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(accepted.inference_id, JobHandle::real("inf-42"));
        assert_eq!(accepted.status, "processing");
    }

    #[tokio::test]
    async fn submit_maps_the_error_envelope() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/generate")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":"Missing required parameters","details":"Prompt, API key, and model ID are required","status":400}"#)
            .create_async()
            .await;

        let client = RelayClient::new(server.url());
        let err = client.submit_generation(&request()).await.unwrap_err();

        match err {
            ClientError::Api { status, message, .. } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Missing required parameters");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn status_poll_parses_a_ready_report() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/check-status")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status":"ready","output":["https://img.example/a.png"]}"#)
            .create_async()
            .await;

        let client = RelayClient::new(server.url());
        let report = client
            .check_status(&JobHandle::real("inf-42"), "test-key")
            .await
            .unwrap();

        assert!(matches!(report, StatusReport::Ready { output, .. } if output.len() == 1));
    }

    #[tokio::test]
    async fn terminal_failure_on_http_500_is_still_a_report() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/check-status")
            .with_status(500)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status":"failed","error":"Image generation failed","details":"NSFW content detected"}"#)
            .create_async()
            .await;

        let client = RelayClient::new(server.url());
        let report = client
            .check_status(&JobHandle::real("inf-42"), "test-key")
            .await
            .unwrap();

        match report {
            StatusReport::Failed { error, details } => {
                assert_eq!(error, "Image generation failed");
                assert_eq!(details, "NSFW content detected");
            }
            other => panic!("expected failed report, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unparseable_status_failure_becomes_an_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/check-status")
            .with_status(502)
            .with_body("<html>bad gateway</html>")
            .create_async()
            .await;

        let client = RelayClient::new(server.url());
        let err = client
            .check_status(&JobHandle::real("inf-42"), "test-key")
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Api { status: 502, .. }));
    }
}
