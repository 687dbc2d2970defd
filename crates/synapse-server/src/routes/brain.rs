//! Inbox and notes routes.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::info;

use crate::routes::error_response;
use crate::state::AppState;
use synapse_store::NoteDraft;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        // Inbox
        .route("/brain/inbox", get(list_inbox).post(capture))
        .route("/brain/inbox/{id}/process", post(process_entry))
        // Notes
        .route("/brain/notes", get(list_notes))
        .route("/brain/notes/{id}", delete(delete_note))
        .route("/brain/notes/{id}/toggle-read", post(toggle_read))
        .route("/brain/notes/export", get(export_notes).post(save_export))
}

// ---------------------------------------------------------------
// Inbox
// ---------------------------------------------------------------

/// GET /api/brain/inbox — unprocessed entries, newest first.
async fn list_inbox(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store.load_inbox() {
        Ok(entries) => (StatusCode::OK, Json(serde_json::json!({ "entries": entries }))),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptureRequest {
    raw_content: String,
    source: Option<String>,
}

/// POST /api/brain/inbox — capture raw text; its type is detected server-side.
async fn capture(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CaptureRequest>,
) -> impl IntoResponse {
    if req.raw_content.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "rawContent is required" })),
        );
    }
    match state
        .store
        .add_inbox_entry(&req.raw_content, req.source.as_deref())
    {
        Ok(entry) => (StatusCode::CREATED, Json(serde_json::json!(entry))),
        Err(e) => error_response(e),
    }
}

/// POST /api/brain/inbox/{id}/process — turn an entry into a note.
async fn process_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(draft): Json<NoteDraft>,
) -> impl IntoResponse {
    match state.store.process_entry(&id, draft) {
        Ok(note) => (StatusCode::CREATED, Json(serde_json::json!(note))),
        Err(e) => error_response(e),
    }
}

// ---------------------------------------------------------------
// Notes
// ---------------------------------------------------------------

/// GET /api/brain/notes — all processed notes.
async fn list_notes(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store.load_notes() {
        Ok(notes) => (StatusCode::OK, Json(serde_json::json!({ "notes": notes }))),
        Err(e) => error_response(e),
    }
}

/// DELETE /api/brain/notes/{id} — returns the remaining notes.
async fn delete_note(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.store.delete_note(&id) {
        Ok(notes) => (StatusCode::OK, Json(serde_json::json!({ "notes": notes }))),
        Err(e) => error_response(e),
    }
}

/// POST /api/brain/notes/{id}/toggle-read — returns the updated notes.
async fn toggle_read(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.store.toggle_note_read(&id) {
        Ok(notes) => (StatusCode::OK, Json(serde_json::json!({ "notes": notes }))),
        Err(e) => error_response(e),
    }
}

/// GET /api/brain/notes/export — all notes as one Markdown document.
async fn export_notes(State(state): State<Arc<AppState>>) -> Response {
    match state.store.export_notes_markdown() {
        Ok(markdown) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
            markdown,
        )
            .into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

/// POST /api/brain/notes/export — write the Markdown export into the exports directory.
async fn save_export(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let markdown = match state.store.export_notes_markdown() {
        Ok(md) => md,
        Err(e) => return error_response(e),
    };
    let id = uuid::Uuid::new_v4().simple().to_string();
    let filename = format!(
        "notes-{}-{}.md",
        chrono::Utc::now().format("%Y%m%d-%H%M%S-%3f"),
        &id[..8]
    );
    let path = state.config.data_paths.exports.join(&filename);
    if let Err(e) = std::fs::write(&path, &markdown) {
        return error_response(e.into());
    }
    info!("Exported notes to {}", path.display());
    (
        StatusCode::CREATED,
        Json(serde_json::json!({
            "filename": filename,
            "path": path.display().to_string(),
            "bytes": markdown.len(),
        })),
    )
}
