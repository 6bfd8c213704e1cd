//! Error envelope DTO

use serde::{Deserialize, Serialize};

/// Error body returned by the relay's submission endpoint.
///
/// The HTTP status is repeated inside the body so callers that only see the
/// payload, or that log it, still know how the request was classified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub details: String,
    pub status: u16,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>, details: impl Into<String>, status: u16) -> Self {
        Self {
            error: error.into(),
            details: details.into(),
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_repeats_the_http_status() {
        let body = ErrorBody::new("Request timeout", "The API request timed out", 504);
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["error"], "Request timeout");
        assert_eq!(json["details"], "The API request timed out");
        assert_eq!(json["status"], 504);
    }
}
