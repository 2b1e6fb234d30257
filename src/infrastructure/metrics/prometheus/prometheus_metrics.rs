//! Prometheus metrics implementation.
//!
//! This module provides the counter-vector variant of the `Metrics` trait.
//! Every completed request increments a counter keyed by (endpoint, method,
//! status) in the global `metrics` crate registry, and `render()` returns
//! the Prometheus text exposition of everything observed so far.
//!
//! The registry is process-wide: two `PrometheusMetrics` values share the
//! same counters.

use crate::domain::{EndpointHit, Metrics, MetricsReport};
use metrics_exporter_prometheus::PrometheusHandle;

/// Prometheus-based metrics implementation.
///
/// Holds the handle of the globally installed recorder so rendering never
/// has to consult global state.
pub struct PrometheusMetrics {
    handle: &'static PrometheusHandle,
}

impl PrometheusMetrics {
    pub fn new(handle: &'static PrometheusHandle) -> Self {
        tracing::info!("Creating Prometheus metrics");
        PrometheusMetrics { handle }
    }
}

#[async_trait::async_trait]
impl Metrics for PrometheusMetrics {
    async fn render(&self) -> anyhow::Result<MetricsReport> {
        Ok(MetricsReport::Text(self.handle.render()))
    }

    async fn record_request(&self, hit: &EndpointHit) {
        tracing::debug!(endpoint = %hit.endpoint, method = %hit.method, "Recording endpoint hit");
        super::increment_endpoint(hit);
        super::track_http_request(hit);
    }
}
