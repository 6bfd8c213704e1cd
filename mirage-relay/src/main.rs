use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod api;
pub mod config;
pub mod mock;
pub mod service;
pub mod upstream;

#[tokio::main]
async fn main() {
    // A missing .env is fine; the environment may come from the shell
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mirage_relay=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Mirage Relay...");

    let config = config::RelayConfig::from_env().expect("Failed to load configuration");

    if config.use_mock_upstream {
        tracing::warn!("Mock upstream enabled: generation requests will be simulated");
    } else {
        tracing::info!("Forwarding to upstream at {}", config.upstream_url);
    }

    let addr = config.bind_addr.clone();
    let app = api::create_router(config);

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
