//! Application state management.
//!
//! This module defines the shared state structure that gets passed to all
//! Axum handlers and middleware via the `State` extractor. The `AppState`
//! owns the medicine store, the request counter, the endpoint metrics
//! backend, and the span emitter.
//!
//! The state is cheaply cloneable (everything heavy sits behind an `Arc`)
//! so Axum can hand a copy to every request.

use crate::domain::{MedicineStore, MetricsPtr, RequestCounter, StorePtr};
use crate::infrastructure::SpanEmitter;
use std::sync::Arc;

/// Shared application state passed to all Axum handlers.
///
/// This struct serves as the Dependency Injection container for the
/// application. Nothing here is a global: a test can build as many
/// independent states as it likes, each with its own store and counter.
///
/// # Lifecycle
///
/// 1. Created once in `create_router()` during application startup
/// 2. Attached to the Axum router via `.with_state(app_state)`
/// 3. Cloned automatically by Axum for each incoming HTTP request
/// 4. Handlers extract via `State(state): State<AppState>`
#[derive(Clone)]
pub struct AppState {
    /// The medicine collection. Reset on every process restart.
    store: StorePtr,

    /// Total requests seen by the pipeline, whatever their outcome.
    requests: Arc<RequestCounter>,

    /// Endpoint metrics backend (no-op, Prometheus or SQLite).
    metrics: MetricsPtr,

    /// Opens a span around every medicine handler.
    spans: SpanEmitter,
}

impl AppState {
    // ---

    pub fn new(store: StorePtr, metrics: MetricsPtr, spans: SpanEmitter) -> Self {
        // ---
        AppState {
            store,
            requests: Arc::new(RequestCounter::new()),
            metrics,
            spans,
        }
    }

    /// State with the seeded store and the global tracer.
    pub fn with_metrics(metrics: MetricsPtr) -> Self {
        Self::new(
            Arc::new(MedicineStore::seeded()),
            metrics,
            SpanEmitter::global(),
        )
    }

    /// Get a reference to the medicine store.
    pub fn store(&self) -> &MedicineStore {
        // ---
        &self.store
    }

    /// Get a reference to the request counter.
    pub fn requests(&self) -> &RequestCounter {
        // ---
        &self.requests
    }

    /// Get a reference to the metrics implementation.
    pub fn metrics(&self) -> &MetricsPtr {
        // ---
        &self.metrics
    }

    /// Get a reference to the span emitter.
    pub fn spans(&self) -> &SpanEmitter {
        // ---
        &self.spans
    }
}
