use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::extractors::{CurrentUser, JsonBody};
use crate::state::AppState;
use crate::store::Note;

#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    /// Optional so that `{}` reaches our validation and produces the
    /// contractual 400 instead of a serde-level rejection.
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
struct NotesResponse {
    notes: Vec<Note>,
}

#[derive(Debug, Serialize)]
struct CreatedResponse {
    created: Note,
}

/// The caller's notes, newest first.
pub async fn list_notes(
    user: CurrentUser,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let notes = state.notes().list_for(&user.sub);
    Ok(HttpResponse::Ok().json(NotesResponse { notes }))
}

/// Append a note for the caller. Missing, empty, or whitespace-only text is
/// rejected without touching the store.
pub async fn append_note(
    user: CurrentUser,
    body: JsonBody<CreateNoteRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let text = body.into_inner().text.unwrap_or_default();
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::validation("text required"));
    }

    let created = state.notes().append_for(&user.sub, text);
    Ok(HttpResponse::Ok().json(CreatedResponse { created }))
}
