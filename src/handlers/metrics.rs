use crate::app_state::AppState;
use crate::domain::MetricsReport;
use crate::handlers::shared_types::ErrorBody;
use crate::REQUEST_COUNT_HEADER;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Handler for the `/metrics` endpoint.
///
/// The body shape depends on the configured backend: Prometheus text for
/// the counter-vector backends, a JSON array of samples for SQLite. Text
/// bodies also get the request counter appended as its own metric.
pub async fn metrics_handler(State(app_state): State<AppState>) -> Response {
    // ---
    let requests = app_state.requests().get().to_string();

    let report = match app_state.metrics().render().await {
        Ok(report) => report,
        Err(err) => {
            tracing::error!("Failed to render metrics: {err:?}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::new("metrics unavailable")),
            )
                .into_response();
        }
    };

    match report {
        MetricsReport::Text(mut text) => {
            text.push_str(&format!(
                "# HELP medicine_api_requests_total Total requests handled since process start.\n\
                 # TYPE medicine_api_requests_total counter\n\
                 medicine_api_requests_total {requests}\n"
            ));
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE.as_str(), PROMETHEUS_CONTENT_TYPE),
                    (REQUEST_COUNT_HEADER, requests.as_str()),
                ],
                text,
            )
                .into_response()
        }
        MetricsReport::Json(samples) => (
            StatusCode::OK,
            [(REQUEST_COUNT_HEADER, requests.as_str())],
            Json(samples),
        )
            .into_response(),
    }
}
