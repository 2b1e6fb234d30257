use crate::domain::EndpointHit;
use metrics::{counter, histogram};

/// Counter-vector keyed by route template and method.
pub const ENDPOINT_REQUESTS_TOTAL: &str = "medicine_api_endpoint_requests_total";

/// Request latency histogram.
pub const HTTP_REQUEST_DURATION: &str = "http_request_duration_seconds";

/// Increment the per-endpoint counter for one completed request.
pub fn increment_endpoint(hit: &EndpointHit) {
    counter!(
        ENDPOINT_REQUESTS_TOTAL,
        "endpoint" => hit.endpoint.clone(),
        "method" => hit.method.clone(),
    )
    .increment(1);
}

/// Track HTTP request latency using a histogram.
pub fn track_http_request(hit: &EndpointHit) {
    let elapsed = hit.start.elapsed();
    histogram!(HTTP_REQUEST_DURATION, "endpoint" => hit.endpoint.clone()).record(elapsed);
}
