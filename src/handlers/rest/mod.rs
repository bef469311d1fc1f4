use axum::{
    Json, Router,
    body::Bytes,
    extract::{
        Path, State,
        rejection::{BytesRejection, PathRejection},
    },
    http::StatusCode,
    routing::{get, post},
};
use axum_macros::debug_handler;
use serde_json::{Value, json};
use utoipa::OpenApi;

use std::sync::Arc;

use crate::{
    dto::{CreateNoteRequest, ErrorResponse, MessageResponse, NoteResponse, UpdateNoteRequest},
    error::{ApiError, ApiResult},
    service::NoteService,
    validation,
};

pub const DELETED_MESSAGE: &str = "Note deleted successfully";

#[derive(OpenApi)]
#[openapi(
    paths(create_note, update_note, delete_note, get_one_note, get_all_notes),
    components(schemas(
        NoteResponse,
        CreateNoteRequest,
        UpdateNoteRequest,
        MessageResponse,
        ErrorResponse
    )),
    tags(
        (name = "notes", description = "Notes management API")
    )
)]
pub struct ApiDoc;

pub fn router(service: Arc<NoteService>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api-doc/openapi.json", get(openapi))
        .route("/notes", post(create_note).get(get_all_notes))
        .route(
            "/notes/{id}",
            get(get_one_note).put(update_note).delete(delete_note),
        )
        .with_state(service)
}

fn read_body(body: Result<Bytes, BytesRejection>) -> ApiResult<Option<Value>> {
    Ok(validation::parse_body(&body?))
}

// A non-integer id can never name a note.
fn note_id(path: Result<Path<i64>, PathRejection>) -> ApiResult<i64> {
    path.map(|Path(id)| id).map_err(|_| ApiError::NotFound)
}

#[utoipa::path(
    post,
    path = "/notes",
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Note created successfully", body = NoteResponse),
        (status = 400, description = "Invalid note payload", body = ErrorResponse),
        (status = 413, description = "Request body too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn create_note(
    State(service): State<Arc<NoteService>>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<(StatusCode, Json<NoteResponse>)> {
    let payload = read_body(body)?;
    let request = validation::validate_create(payload.as_ref())?;

    let note = service
        .create_note(request)
        .await
        .map_err(ApiError::storage("Failed to create note"))?;

    tracing::debug!("created note {}", note.id);
    Ok((StatusCode::CREATED, Json(note)))
}

#[utoipa::path(
    put,
    path = "/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "Note updated successfully", body = NoteResponse),
        (status = 400, description = "Invalid note payload", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 413, description = "Request body too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn update_note(
    State(service): State<Arc<NoteService>>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<NoteResponse>> {
    let id = note_id(id)?;

    // Existence is checked before the payload.
    service
        .get_one_note(id)
        .await
        .map_err(ApiError::storage("Failed to update note"))?
        .ok_or(ApiError::NotFound)?;

    let payload = read_body(body)?;
    let request = validation::validate_update(payload.as_ref())?;

    service
        .update_note(id, request)
        .await
        .map_err(ApiError::storage("Failed to update note"))?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

#[utoipa::path(
    delete,
    path = "/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note deleted successfully", body = MessageResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn delete_note(
    State(service): State<Arc<NoteService>>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let id = note_id(id)?;

    let deleted = service
        .delete_note(id)
        .await
        .map_err(ApiError::storage("Failed to delete note"))?;

    if !deleted {
        return Err(ApiError::NotFound);
    }

    Ok(Json(MessageResponse {
        message: DELETED_MESSAGE.to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note found", body = NoteResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_one_note(
    State(service): State<Arc<NoteService>>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<NoteResponse>> {
    let id = note_id(id)?;

    service
        .get_one_note(id)
        .await
        .map_err(ApiError::storage("Failed to retrieve note"))?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

#[utoipa::path(
    get,
    path = "/notes",
    responses(
        (status = 200, description = "List of all notes", body = Vec<NoteResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_all_notes(
    State(service): State<Arc<NoteService>>,
) -> ApiResult<Json<Vec<NoteResponse>>> {
    service
        .get_all_notes()
        .await
        .map(Json)
        .map_err(ApiError::storage("Failed to retrieve notes"))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
