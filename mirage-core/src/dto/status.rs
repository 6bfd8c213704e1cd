//! Status polling DTOs

use serde::{Deserialize, Serialize};

use crate::domain::job::JobStatus;

/// Request body for `POST /api/check-status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusRequest {
    /// Wire form of the job handle; parsed into a typed handle by the relay
    /// right after presence validation.
    #[serde(default)]
    pub inference_id: String,
    #[serde(default)]
    pub api_key: String,
}

/// Response body for `POST /api/check-status`.
///
/// Tagged on `status`. The first two variants ride on 2xx responses;
/// `Failed` and `Error` accompany non-2xx codes but still carry a parseable
/// body so callers can distinguish a dead job from a failed observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum StatusReport {
    /// The job is still being generated.
    Processing {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    /// The job finished; `output` holds the artifact URIs.
    Ready {
        output: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    /// The job failed upstream. Terminal.
    Failed { error: String, details: String },
    /// The observation itself failed; the job's state is unknown.
    Error {
        error: String,
        details: String,
        #[serde(
            rename = "statusCode",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        status_code: Option<u16>,
    },
}

impl StatusReport {
    pub fn processing() -> Self {
        Self::Processing {
            message: Some("Image generation in progress".to_string()),
        }
    }

    pub fn ready(output: Vec<String>) -> Self {
        Self::Ready {
            output,
            message: Some("Image generated successfully".to_string()),
        }
    }

    pub fn failed(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Failed {
            error: error.into(),
            details: details.into(),
        }
    }
}

/// Renders a domain status onto the wire report, filling in the
/// human-readable messages the HTTP surface sends.
impl From<JobStatus> for StatusReport {
    fn from(status: JobStatus) -> Self {
        match status {
            JobStatus::Processing => Self::processing(),
            JobStatus::Ready { outputs } => Self::ready(outputs),
            JobStatus::Failed { detail } => Self::failed("Image generation failed", detail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_request_tolerates_missing_fields() {
        let body: StatusRequest = serde_json::from_str("{}").unwrap();

        assert!(body.inference_id.is_empty());
        assert!(body.api_key.is_empty());
    }

    #[test]
    fn report_is_tagged_on_the_status_field() {
        let ready = StatusReport::ready(vec!["https://img.example/a.png".into()]);
        let json = serde_json::to_value(&ready).unwrap();

        assert_eq!(json["status"], "ready");
        assert_eq!(json["output"][0], "https://img.example/a.png");
        assert_eq!(json["message"], "Image generated successfully");
    }

    #[test]
    fn failed_report_carries_error_and_details() {
        let json = serde_json::to_value(StatusReport::failed("boom", "it broke")).unwrap();

        assert_eq!(json["status"], "failed");
        assert_eq!(json["error"], "boom");
        assert_eq!(json["details"], "it broke");
    }

    #[test]
    fn error_report_round_trips_its_status_code() {
        let report = StatusReport::Error {
            error: "Failed to check image status".into(),
            details: "connection reset".into(),
            status_code: Some(504),
        };
        let json = serde_json::to_string(&report).unwrap();

        assert!(json.contains(r#""statusCode":504"#));
        let back: StatusReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn domain_status_renders_onto_the_wire_report() {
        let ready = StatusReport::from(JobStatus::Ready {
            outputs: vec!["https://img.example/a.png".into()],
        });
        assert_eq!(
            ready,
            StatusReport::ready(vec!["https://img.example/a.png".into()])
        );

        let failed = StatusReport::from(JobStatus::Failed {
            detail: "NSFW content detected".into(),
        });
        assert_eq!(
            failed,
            StatusReport::failed("Image generation failed", "NSFW content detected")
        );

        assert_eq!(
            StatusReport::from(JobStatus::Processing),
            StatusReport::processing()
        );
    }
}
