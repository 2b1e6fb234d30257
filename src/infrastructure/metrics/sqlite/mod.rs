mod sqlite_metrics;

pub use sqlite_metrics::SqliteMetrics;
use std::sync::Arc;

/// Creates the persisted-sample metrics implementation.
///
/// Opens (creating if needed) the single-file SQLite database at `url` and
/// ensures the sample table exists. Failure here is a startup error.
pub async fn create(url: &str) -> anyhow::Result<crate::domain::MetricsPtr> {
    tracing::info!(url, "Initializing SQLite metrics");
    let metrics = SqliteMetrics::connect(url).await?;

    Ok(Arc::new(metrics))
}
