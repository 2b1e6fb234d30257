use axum::{http::StatusCode, Json};

#[derive(serde::Serialize)]
pub struct HealthResponse {
    status: &'static str,
}

/// Responds with the health status of the server.
///
/// The service has no external dependencies on the request path, so a
/// running process is a healthy one.
///
/// # Responses
/// - `200 OK` with `{ "status": "ok" }`
pub async fn health_check() -> (StatusCode, Json<HealthResponse>) {
    (StatusCode::OK, Json(HealthResponse { status: "ok" }))
}
