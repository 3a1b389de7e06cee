//! HTTP route handlers for the user API.

use crate::error::RegistryError;
use crate::http::error::ApiError;
use crate::http::AppState;
use crate::types::{Record, RecordDraft};
use crate::validate::check_format;
use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use chrono::NaiveDate;
use serde::Deserialize;

type ApiResult<T> = std::result::Result<T, ApiError>;

/// Build the API router.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(users_in_range)
                .post(create_user)
                .put(update_user)
                .patch(partial_update_user)
                .delete(delete_user),
        )
        .route("/users/{email}", get(get_user))
}

pub(crate) async fn health() -> &'static str {
    "ok"
}

/// POST /api/users - create a record.
async fn create_user(
    State(state): State<AppState>,
    uri: Uri,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Record>)> {
    let draft = validated_draft(&state, &uri, &body)?;
    let record = state
        .store
        .create(draft)
        .map_err(|e| ApiError::new(&uri, e))?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT /api/users - replace a record.
async fn update_user(
    State(state): State<AppState>,
    uri: Uri,
    body: Bytes,
) -> ApiResult<Json<Record>> {
    let draft = validated_draft(&state, &uri, &body)?;
    let record = state
        .store
        .update(draft)
        .map_err(|e| ApiError::new(&uri, e))?;
    Ok(Json(record))
}

/// PATCH /api/users - merge present fields into a record.
///
/// Patches are not format-checked; only the fields they carry matter.
async fn partial_update_user(
    State(state): State<AppState>,
    uri: Uri,
    body: Bytes,
) -> ApiResult<Json<Record>> {
    let patch = decode_draft(&body)
        .and_then(|draft| draft.ok_or(RegistryError::MissingField("record")))
        .map_err(|e| ApiError::new(&uri, e))?;
    let record = state
        .store
        .partial_update(patch)
        .map_err(|e| ApiError::new(&uri, e))?;
    Ok(Json(record))
}

/// DELETE /api/users - remove the record equal to the body.
async fn delete_user(
    State(state): State<AppState>,
    uri: Uri,
    body: Bytes,
) -> ApiResult<StatusCode> {
    let record = validated_draft(&state, &uri, &body)?
        .ok_or(RegistryError::MissingField("record"))
        .and_then(RecordDraft::into_record)
        .map_err(|e| ApiError::new(&uri, e))?;
    state.store.delete(&record);
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RangeParams {
    start_date: Option<String>,
    end_date: Option<String>,
}

/// GET /api/users?startDate=..&endDate=.. - records born within the range.
async fn users_in_range(
    State(state): State<AppState>,
    uri: Uri,
    params: Result<Query<RangeParams>, QueryRejection>,
) -> ApiResult<Json<Vec<Record>>> {
    let Query(params) =
        params.map_err(|e| ApiError::new(&uri, RegistryError::InvalidFormat(e.body_text())))?;

    let from = parse_date(params.start_date, "startDate").map_err(|e| ApiError::new(&uri, e))?;
    let to = parse_date(params.end_date, "endDate").map_err(|e| ApiError::new(&uri, e))?;

    let records = state
        .store
        .query_by_date_range(from, to)
        .map_err(|e| ApiError::new(&uri, e))?;
    Ok(Json(records))
}

/// GET /api/users/{email} - one record by key.
async fn get_user(
    State(state): State<AppState>,
    uri: Uri,
    Path(email): Path<String>,
) -> ApiResult<Json<Record>> {
    let record = state
        .store
        .get_by_key(&email)
        .map_err(|e| ApiError::new(&uri, e))?;
    Ok(Json(record))
}

/// Decode a body into a draft. An empty body or `null` means no record.
fn decode_draft(body: &[u8]) -> crate::Result<Option<RecordDraft>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    Ok(serde_json::from_slice(body)?)
}

/// Decode a body and run the field-format checks on it.
fn validated_draft(state: &AppState, uri: &Uri, body: &[u8]) -> ApiResult<Option<RecordDraft>> {
    let draft = decode_draft(body).map_err(|e| ApiError::new(uri, e))?;
    if let Some(draft) = &draft {
        let errors = check_format(draft, state.store.today());
        if !errors.is_empty() {
            return Err(ApiError::new(uri, RegistryError::Validation(errors)));
        }
    }
    Ok(draft)
}

fn parse_date(value: Option<String>, field: &'static str) -> crate::Result<NaiveDate> {
    let value = value.ok_or(RegistryError::MissingField(field))?;
    Ok(value.parse::<NaiveDate>()?)
}
