//! Scoped trace spans around handler invocations.
//!
//! A handler calls [`SpanEmitter::start`] on entry and gets back an
//! [`OperationSpan`]. The span is ended in `Drop`, so every exit path closes
//! it, including early returns on validation failure.

use axum::http::HeaderMap;
use opentelemetry::{
    global::{self, BoxedSpan, BoxedTracer},
    propagation::{Extractor, TextMapPropagator},
    trace::{Span, Status, Tracer},
    KeyValue,
};
use opentelemetry_sdk::propagation::TraceContextPropagator;
use std::error::Error;
use std::sync::Arc;

/// Instrumentation scope name for all medicine spans.
pub const TRACER_NAME: &str = "medicine-api";

struct HeaderExtractor<'a>(&'a HeaderMap);

impl Extractor for HeaderExtractor<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(|k| k.as_str()).collect()
    }
}

/// Opens one span per handler invocation, continuing any inbound W3C trace.
#[derive(Clone)]
pub struct SpanEmitter {
    tracer: Arc<BoxedTracer>,
    propagator: Arc<TraceContextPropagator>,
}

impl SpanEmitter {
    // ---
    pub fn new(tracer: BoxedTracer) -> Self {
        // ---
        Self {
            tracer: Arc::new(tracer),
            propagator: Arc::new(TraceContextPropagator::new()),
        }
    }

    /// Emitter backed by whatever tracer provider is installed globally.
    pub fn global() -> Self {
        Self::new(global::tracer(TRACER_NAME))
    }

    /// Starts span `name` as a child of the trace carried in `headers`, if any.
    pub fn start(&self, name: &'static str, headers: &HeaderMap) -> OperationSpan {
        // ---
        let parent = self.propagator.extract(&HeaderExtractor(headers));
        let span = self.tracer.start_with_context(name, &parent);

        tracing::debug!(span = name, "span opened");
        OperationSpan { name, span }
    }
}

impl Default for SpanEmitter {
    fn default() -> Self {
        Self::global()
    }
}

/// A live span that ends when dropped.
pub struct OperationSpan {
    name: &'static str,
    span: BoxedSpan,
}

impl OperationSpan {
    // ---
    /// The record affected by a successful lookup or mutation.
    pub fn record_id(&mut self, id: i64) {
        self.span.set_attribute(KeyValue::new("medicine.id", id));
    }

    /// Result size of a list operation.
    pub fn record_count(&mut self, count: usize) {
        let count = i64::try_from(count).unwrap_or(i64::MAX);
        self.span.set_attribute(KeyValue::new("medicine.count", count));
    }

    /// The id that was looked up and not found. Not an error.
    pub fn record_not_found(&mut self, id: i64) {
        self.span
            .set_attribute(KeyValue::new("medicine.not_found_id", id));
    }

    /// Input could not be parsed; marks the span as failed.
    pub fn record_invalid(&mut self, err: &dyn Error) {
        self.span.record_error(err);
        self.span.set_status(Status::error(err.to_string()));
    }
}

impl Drop for OperationSpan {
    fn drop(&mut self) {
        self.span.end();
        tracing::debug!(span = self.name, "span closed");
    }
}
