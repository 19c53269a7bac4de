//! Note endpoints: create, decrypt, list.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use notes_core::{NoteFilter, NoteService, NoteStore, NoteSummary};
use serde::{Deserialize, Serialize};

use super::error::ApiError;

const CREATE_REQUIRED: &str = "Content and key are required";
const DECRYPT_REQUIRED: &str = "Decryption key is required";

/// Request to create a note. Missing fields count as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateNoteRequest {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, alias = "passphrase")]
    pub key: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNoteResponse {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecryptNoteRequest {
    #[serde(default, alias = "passphrase")]
    pub key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecryptNoteResponse {
    pub content: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListNotesQuery {
    pub owner: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListNotesResponse {
    pub notes: Vec<NoteSummary>,
}

/// Oversized bodies keep their 413; anything else unreadable is a 400.
fn body_rejection(rejection: JsonRejection) -> ApiError {
    tracing::debug!(error = %rejection, "rejected request body");
    let status = rejection.status();
    match rejection {
        JsonRejection::BytesRejection(_) if status == StatusCode::PAYLOAD_TOO_LARGE => {
            ApiError::new(status, "Request body too large")
        }
        _ => ApiError::bad_request("Invalid JSON body"),
    }
}

pub async fn create_handler<S: NoteStore + 'static>(
    State(service): State<Arc<NoteService<S>>>,
    payload: Result<Json<CreateNoteRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload.map_err(body_rejection)?;

    let content = request.content.unwrap_or_default();
    let key = request.key.unwrap_or_default();

    let created = service
        .create(&content, &key, request.owner.as_deref())
        .await
        .map_err(|e| ApiError::from_notes(e, CREATE_REQUIRED))?;

    Ok((
        StatusCode::OK,
        Json(CreateNoteResponse {
            id: created.id,
            created_at: created.created_at,
            message: "Note encrypted and stored successfully".to_string(),
        }),
    )
        .into_response())
}

pub async fn decrypt_handler<S: NoteStore + 'static>(
    State(service): State<Arc<NoteService<S>>>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<DecryptNoteRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Path(id) = id.map_err(|_| ApiError::bad_request("Invalid note id"))?;
    let Json(request) = payload.map_err(body_rejection)?;

    let key = request.key.unwrap_or_default();
    let content = service
        .decrypt(id, &key)
        .await
        .map_err(|e| ApiError::from_notes(e, DECRYPT_REQUIRED))?;

    Ok((
        StatusCode::OK,
        Json(DecryptNoteResponse {
            content,
            message: "Note decrypted successfully".to_string(),
        }),
    )
        .into_response())
}

pub async fn list_handler<S: NoteStore + 'static>(
    State(service): State<Arc<NoteService<S>>>,
    query: Result<Query<ListNotesQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query.map_err(|_| ApiError::bad_request("Invalid query"))?;

    let mut filter = NoteFilter::new();
    if let Some(owner) = query.owner {
        filter = filter.owner(owner);
    }
    if let Some(limit) = query.limit {
        filter = filter.limit(limit);
    }

    let notes = service
        .list(&filter)
        .await
        .map_err(|e| ApiError::from_notes(e, "Invalid query"))?;

    Ok((StatusCode::OK, Json(ListNotesResponse { notes })).into_response())
}
