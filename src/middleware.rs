//! Request pipeline stages that run before every handler.
//!
//! Order is fixed by `create_router`: the request counter sees the request
//! first, then the endpoint metrics stage wraps the handler and records the
//! outcome once the response exists.

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

use crate::app_state::AppState;
use crate::domain::EndpointHit;

/// Route label for requests that matched no route (fallback 404s).
pub const UNMATCHED_ROUTE: &str = "unmatched";

/// Counts every inbound request, before routing decides anything.
pub async fn count_requests(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    // ---
    let total = state.requests().increment();
    tracing::trace!(total, "request counted");

    next.run(request).await
}

/// Records one endpoint occurrence per completed request.
///
/// The label is the matched route template, so `/medicines/1` and
/// `/medicines/2` count against the same `/medicines/{id}` key.
pub async fn record_endpoint(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    // ---
    let start = Instant::now();
    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string());
    let method = request.method().to_string();

    let response = next.run(request).await;

    let hit = EndpointHit {
        endpoint,
        method,
        status: response.status().as_u16(),
        start,
    };
    tracing::info!(
        endpoint = %hit.endpoint,
        method = %hit.method,
        status = hit.status,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "request completed"
    );
    state.metrics().record_request(&hit).await;

    response
}
