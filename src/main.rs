use anyhow::{Context, Result};
use std::sync::Arc;
use vehicle_map::api::FeedClient;
use vehicle_map::config::Config;
use vehicle_map::web::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
        )
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;

    let feed = FeedClient::new(&config.feed).context("Failed to create feed client")?;
    tracing::info!(url = feed.url(), timeout = ?config.feed.timeout, "GTFS-RT client ready");

    let state = Arc::new(AppState {
        feed,
        poll_interval: config.server.poll_interval,
    });

    let listener = tokio::net::TcpListener::bind(config.server.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind_addr))?;

    tracing::info!(
        addr = %config.server.bind_addr,
        poll_interval = ?config.server.poll_interval,
        "Serving vehicle map"
    );

    axum::serve(listener, create_router(state))
        .await
        .context("Server error")?;

    Ok(())
}
