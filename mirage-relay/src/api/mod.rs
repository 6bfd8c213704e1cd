//! API Module
//!
//! HTTP API layer for the relay.
//! Each submodule handles one endpoint.

pub mod error;
pub mod generate;
pub mod health;
pub mod status;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::RelayConfig;
use crate::upstream::UpstreamClient;

/// Shared state for all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: RelayConfig,
    pub upstream: UpstreamClient,
}

impl AppState {
    pub fn new(config: RelayConfig) -> Self {
        let upstream = UpstreamClient::new(&config);
        Self { config, upstream }
    }
}

/// Create the main API router with all endpoints
pub fn create_router(config: RelayConfig) -> Router {
    let state = Arc::new(AppState::new(config));

    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Generation endpoints
        .route("/api/generate", post(generate::submit_generation))
        .route("/api/check-status", post(status::check_status))
        // Connectivity probe
        .route("/api/test", get(test::probe).post(test::echo))
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // The caller is a browser front-end on another origin
        .layer(CorsLayer::permissive())
}
