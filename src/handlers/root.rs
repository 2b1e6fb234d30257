use axum::{extract::State, response::IntoResponse};

use crate::app_state::AppState;

pub async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    let version = env!("CARGO_PKG_VERSION");
    let requests = state.requests().get();
    format!(
        r#"Welcome to the Pharmacy Medicine API
Version: {version}
Requests handled: {requests}

Available endpoints:
  - GET    /medicines         - List all medicines
  - GET    /medicines/{{id}}    - Fetch a medicine by ID
  - POST   /medicines         - Create a medicine (id is assigned)
  - PUT    /medicines/{{id}}    - Replace a medicine by ID
  - DELETE /medicines/{{id}}    - Delete a medicine by ID
  - GET    /metrics           - Endpoint metrics
  - GET    /health            - Health check
  - GET    /swagger/index.html - API documentation
"#
    )
}
