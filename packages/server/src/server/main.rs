// Main entry point for the valuation API server

use anyhow::{Context, Result};
use server_core::{kernel::ServerDeps, server::build_app, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting property valuation API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    let server_deps = ServerDeps::from_config(&config);
    tracing::info!(
        search = server_deps.market_search.is_some(),
        extraction = server_deps.extractor.is_some(),
        email = server_deps.email.is_some(),
        storage = server_deps.storage.is_some(),
        "Configuration loaded"
    );

    // Build application
    let app = build_app(server_deps);

    // Start server
    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
