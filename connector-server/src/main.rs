use anyhow::{Context, Result};
use connector_server::{create_router, ApiState};
use mindshare::client::KeywordClient;
use mindshare::config::ServiceConfig;
use mindshare::Connector;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "connector_server=info,mindshare=info".into()),
        )
        .init();

    info!("Connector server starting...");

    let config = ServiceConfig::from_env().context("Failed to load configuration")?;
    info!(
        base_url = %config.api.base_url,
        timeout_seconds = ?config.api.timeout_seconds,
        port = config.server.port,
        "Configuration loaded"
    );

    let client = KeywordClient::new(&config.api).context("Failed to initialize API client")?;
    let state = ApiState {
        connector: Connector::new(Arc::new(client)),
    };
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.server.port))
        .await
        .context("Failed to bind connector API port")?;
    info!(port = config.server.port, "Connector API listening");

    let server_handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            tracing::error!(error = %e, "Connector API server error");
        }
    });

    // Wait for shutdown signal
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for ctrl_c signal")?;
    info!("Shutdown signal received");

    server_handle.abort();
    info!("Connector server stopped");

    Ok(())
}
