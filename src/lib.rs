// src/lib.rs
use anyhow::Result;
use axum::{middleware::from_fn_with_state, routing::get, Router};

use domain::MetricsPtr;
use handlers::*;

// Public exports (visible outside this module)
pub mod domain;

// Internal-only exports (sibling access within this module)
mod app_state;
mod config;
mod handlers;
mod infrastructure;
mod logging;
mod middleware;

// Hoist up only the public symbol(s)
pub use app_state::AppState;
pub use config::*;
pub use handlers::ErrorBody;
pub use logging::init_logging;
pub use middleware::UNMATCHED_ROUTE;

// Publicly expose the infrastructure creation functions
pub use infrastructure::{
    create_noop_metrics, // ---
    create_prom_metrics,
    create_sqlite_metrics,
    init_tracer_provider,
    OperationSpan,
    SpanEmitter,
};

/// Header carrying the request total on `/metrics` responses.
pub const REQUEST_COUNT_HEADER: &str = "x-request-count";

/// Builds the metrics backend selected by configuration.
pub async fn create_metrics(config: &MetricsConfig) -> Result<MetricsPtr> {
    // ---
    match config.kind {
        MetricsKind::Noop => create_noop_metrics(),
        MetricsKind::Prometheus => create_prom_metrics(),
        MetricsKind::Sqlite => create_sqlite_metrics(&config.database_url).await,
    }
}

/// Build the HTTP router with every dependency determined by environment variables.
pub async fn create_router() -> Result<Router> {
    // ---
    // Load all configuration from environment
    let config = AppConfig::from_env()?;
    init_logging(&config.logging)?;

    let metrics = create_metrics(&config.metrics).await?;

    Ok(build_router(AppState::with_metrics(metrics)))
}

/// Wire routes and the request pipeline around an explicitly built state.
///
/// Pipeline order, outermost first: request counter, endpoint metrics,
/// then the matched handler (which opens its own span).
pub fn build_router(app_state: AppState) -> Router {
    // ---
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/medicines", get(get_medicines).post(create_medicine))
        .route(
            "/medicines/{id}",
            get(get_medicine_by_id)
                .put(update_medicine)
                .delete(delete_medicine),
        )
        .route("/swagger/{*path}", get(swagger_handler))
        .layer(from_fn_with_state(
            app_state.clone(),
            middleware::record_endpoint,
        ))
        .layer(from_fn_with_state(
            app_state.clone(),
            middleware::count_requests,
        ))
        .with_state(app_state)
}
