use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde_json::{Map, Value};

use crate::app_state::AppState;
use crate::domain::{parse_id, Medicine, StoreError};
use crate::infrastructure::OperationSpan;

/// Request body as extracted: any JSON object, not yet a medicine.
type Payload = Result<Json<Map<String, Value>>, JsonRejection>;

/// Turns a request body into a `Medicine` or `InvalidArgument`.
///
/// Every rejection is a client error here, including a wrong content type
/// or a well-formed body of the wrong shape, so they all map to 400. The
/// body must be a JSON object: arrays and scalars never become records.
fn parse_payload(span: &mut OperationSpan, payload: Payload) -> Result<Medicine, StoreError> {
    // ---
    let Json(fields) = payload.map_err(|rejection| {
        span.record_invalid(&rejection);
        StoreError::InvalidArgument(rejection.body_text())
    })?;

    serde_json::from_value(Value::Object(fields)).map_err(|err| {
        span.record_invalid(&err);
        StoreError::InvalidArgument(format!("Failed to deserialize the JSON body: {err}"))
    })
}

fn parse_path_id(span: &mut OperationSpan, raw_id: &str) -> Result<i64, StoreError> {
    parse_id(raw_id).inspect_err(|err| span.record_invalid(err))
}

/// Annotates the span with the outcome of a store operation on `id`.
fn observe<T>(
    span: &mut OperationSpan,
    id: i64,
    result: Result<T, StoreError>,
) -> Result<T, StoreError> {
    // ---
    match &result {
        Ok(_) => span.record_id(id),
        Err(StoreError::NotFound(missing)) => span.record_not_found(*missing),
        Err(err) => span.record_invalid(err),
    }
    result
}

/// Handler for listing every medicine (GET /medicines).
///
/// Always responds `200 OK` with the records in storage order.
#[tracing::instrument(skip_all)]
pub async fn get_medicines(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<Vec<Medicine>> {
    // ---
    let mut span = state.spans().start("get-medicines", &headers);

    let medicines = state.store().list_all();
    span.record_count(medicines.len());

    Json(medicines)
}

/// Handler for fetching a medicine by ID (GET /medicines/{id}).
///
/// - `200 OK` with the record when it exists.
/// - `400 Bad Request` when `id` is not an integer.
/// - `404 Not Found` when no record has that id.
#[tracing::instrument(skip(state, headers))]
pub async fn get_medicine_by_id(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Medicine>, StoreError> {
    // ---
    let mut span = state.spans().start("get-medicine-by-id", &headers);
    let id = parse_path_id(&mut span, &id)?;

    let medicine = observe(&mut span, id, state.store().get_by_id(id))?;
    Ok(Json(medicine))
}

/// Handler for creating a medicine (POST /medicines).
///
/// Any `id` in the body is ignored; the store assigns one.
///
/// - `201 Created` with the stored record.
/// - `400 Bad Request` when the body is not a medicine.
#[tracing::instrument(skip_all)]
pub async fn create_medicine(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Payload,
) -> Result<(StatusCode, Json<Medicine>), StoreError> {
    // ---
    let mut span = state.spans().start("create-medicine", &headers);
    let medicine = parse_payload(&mut span, payload)?;

    let created = state.store().create(medicine);
    span.record_id(created.id);
    tracing::info!(id = created.id, name = %created.name, "medicine created");

    Ok((StatusCode::CREATED, Json(created)))
}

/// Handler for replacing a medicine (PUT /medicines/{id}).
///
/// The path id always wins over any id in the body.
///
/// - `200 OK` with the updated record.
/// - `400 Bad Request` for a bad id (checked first) or a bad body.
/// - `404 Not Found` when no record has that id.
#[tracing::instrument(skip(state, headers, payload))]
pub async fn update_medicine(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    payload: Payload,
) -> Result<Json<Medicine>, StoreError> {
    // ---
    let mut span = state.spans().start("update-medicine", &headers);
    let id = parse_path_id(&mut span, &id)?;
    let medicine = parse_payload(&mut span, payload)?;

    let updated = observe(&mut span, id, state.store().update(id, medicine))?;
    Ok(Json(updated))
}

/// Handler for deleting a medicine (DELETE /medicines/{id}).
///
/// - `204 No Content` once removed.
/// - `400 Bad Request` when `id` is not an integer.
/// - `404 Not Found` when no record has that id.
#[tracing::instrument(skip(state, headers))]
pub async fn delete_medicine(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, StoreError> {
    // ---
    let mut span = state.spans().start("delete-medicine", &headers);
    let id = parse_path_id(&mut span, &id)?;

    observe(&mut span, id, state.store().delete(id))?;
    tracing::info!(id, "medicine deleted");

    Ok(StatusCode::NO_CONTENT)
}
