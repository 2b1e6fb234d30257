use anyhow::Result;
use medicine_api::{
    build_router, create_metrics, init_logging, init_tracer_provider, AppConfig, AppState,
};
use tokio::net::TcpListener;
use tracing::info;

/// Resolves when the process receives Ctrl-C.
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {err:?}");
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; the environment may already be set.
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;

    // Startup failures below (log file, metrics database) abort the process.
    init_logging(&config.logging)?;
    let tracer_provider = init_tracer_provider(&config.telemetry);
    let metrics = create_metrics(&config.metrics).await?;

    let app = build_router(AppState::with_metrics(metrics));

    let endpoint = &config.server.bind_addr;
    info!("Starting at endpoint:{}", endpoint);
    info!(
        "Starting Pharmacy Medicine API server v{}...",
        env!("CARGO_PKG_VERSION")
    );

    let listener = TcpListener::bind(endpoint).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(provider) = tracer_provider {
        if let Err(err) = provider.shutdown() {
            tracing::warn!("Tracer provider shutdown failed: {err:?}");
        }
    }

    Ok(())
}
