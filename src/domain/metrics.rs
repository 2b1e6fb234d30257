use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

/// One completed request, as seen by the metrics middleware.
#[derive(Debug, Clone)]
pub struct EndpointHit {
    /// Matched route template (e.g. `/medicines/{id}`), never the literal path.
    pub endpoint: String,
    pub method: String,
    pub status: u16,
    pub start: Instant,
}

/// A persisted endpoint occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointMetricSample {
    pub endpoint: String,
    pub method: String,
    pub timestamp: DateTime<Utc>,
    pub count: i64,
}

/// Rendered metrics, in whichever shape the backend produces.
#[derive(Debug, Clone)]
pub enum MetricsReport {
    /// Prometheus text exposition format.
    Text(String),

    /// Stored samples, returned unfiltered in insertion order.
    Json(Vec<EndpointMetricSample>),
}

/// Abstraction for endpoint metrics (counter-vector or persisted samples).
#[async_trait::async_trait]
pub trait Metrics: Send + Sync + 'static {
    // ---
    /// Render current metrics.
    async fn render(&self) -> anyhow::Result<MetricsReport>;

    /// Record exactly one occurrence for a completed request.
    ///
    /// Backend failures are logged, never returned, so a metrics outage
    /// cannot change the outcome of the request being recorded.
    async fn record_request(&self, hit: &EndpointHit);
}

/// Type alias for any backend that implements Metrics.
pub type MetricsPtr = Arc<dyn Metrics>;
