mod counters;
mod prometheus_metrics;
mod recorder;

pub use prometheus_metrics::PrometheusMetrics;
use std::sync::Arc;

// Re-export utilities for internal use within this module
pub(crate) use counters::{increment_endpoint, track_http_request};
pub(crate) use recorder::init_metrics;

/// Creates a new Prometheus metrics implementation.
///
/// This implementation collects a counter-vector in Prometheus format and
/// exposes it through the `/metrics` endpoint for scraping.
pub fn create() -> anyhow::Result<crate::domain::MetricsPtr> {
    tracing::info!("Initializing Prometheus metrics");
    let handle = init_metrics()?;

    Ok(Arc::new(PrometheusMetrics::new(handle)))
}
