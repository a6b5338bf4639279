// Media Service - blob storage over HTTP
// Entry point and application setup

use anyhow::Context;
use clap::Parser;
use media_service::cli::Args;
use media_service::config::ServiceConfig;
use media_service::{api, app};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "media_service=debug,tower_http=info,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting media service");

    let config = ServiceConfig::from(Args::parse());

    let state = app::setup(config.clone())
        .await
        .context("failed to open media storage")?;

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    api::serve(listener, state.clone(), shutdown_signal())
        .await
        .context("media API terminated unexpectedly")?;

    app::shutdown(&state)
        .await
        .context("failed to flush media registry")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
