use crate::domain::{EndpointHit, Metrics, MetricsReport};

/// No-op metrics implementation for testing.
#[derive(Default)]
pub struct NoopMetrics;

impl NoopMetrics {
    pub fn new() -> Self {
        NoopMetrics
    }
}

#[async_trait::async_trait]
impl Metrics for NoopMetrics {
    // ---
    async fn render(&self) -> anyhow::Result<MetricsReport> {
        Ok(MetricsReport::Text(String::new()))
    }
    async fn record_request(&self, _: &EndpointHit) {}
}
