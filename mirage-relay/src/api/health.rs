//! Health Check API Handler
//!
//! Liveness probe for the relay. Answers from the process itself and
//! never touches the upstream, so it stays green in mock mode and during
//! upstream outages alike.

use axum::{http::StatusCode, response::IntoResponse};

/// GET /health
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
