//! Persisted-sample metrics implementation.
//!
//! Each completed request appends one timestamped row with `count = 1` to an
//! append-only SQLite table. Rendering returns every row, unfiltered, in
//! insertion order.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

use crate::domain::{EndpointHit, EndpointMetricSample, Metrics, MetricsReport};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS endpoint_metrics (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    endpoint TEXT NOT NULL,
    method TEXT NOT NULL,
    timestamp TEXT NOT NULL,
    count INTEGER NOT NULL
)";

#[derive(sqlx::FromRow)]
struct SampleRow {
    endpoint: String,
    method: String,
    timestamp: DateTime<Utc>,
    count: i64,
}

pub struct SqliteMetrics {
    // ---
    pool: SqlitePool,
}

impl SqliteMetrics {
    // ---
    /// Opens the database and creates the sample table.
    ///
    /// The pool holds a single connection: writes are serialized, and an
    /// in-memory database (`sqlite::memory:`) lives as long as the pool.
    pub async fn connect(url: &str) -> Result<Self> {
        // ---
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("invalid metrics database url: {url}"))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .with_context(|| format!("cannot open metrics database: {url}"))?;

        sqlx::query(CREATE_TABLE).execute(&pool).await?;

        Ok(Self { pool })
    }

    async fn insert(&self, hit: &EndpointHit) -> Result<()> {
        // ---
        sqlx::query(
            "INSERT INTO endpoint_metrics (endpoint, method, timestamp, count) VALUES (?, ?, ?, 1)",
        )
        .bind(&hit.endpoint)
        .bind(&hit.method)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait::async_trait]
impl Metrics for SqliteMetrics {
    // ---
    async fn render(&self) -> Result<MetricsReport> {
        // ---
        let rows = sqlx::query_as::<_, SampleRow>(
            "SELECT endpoint, method, timestamp, count FROM endpoint_metrics ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        let samples = rows
            .into_iter()
            .map(|r| EndpointMetricSample {
                endpoint: r.endpoint,
                method: r.method,
                timestamp: r.timestamp,
                count: r.count,
            })
            .collect();

        Ok(MetricsReport::Json(samples))
    }

    async fn record_request(&self, hit: &EndpointHit) {
        // ---
        if let Err(err) = self.insert(hit).await {
            tracing::error!(endpoint = %hit.endpoint, "Failed to persist metric sample: {err:?}");
        }
    }
}
