pub mod metrics;
pub mod telemetry;

// Re-export the factory functions for easy access
pub use metrics::{create_noop_metrics, create_prom_metrics, create_sqlite_metrics};
pub use telemetry::{init_tracer_provider, OperationSpan, SpanEmitter};
