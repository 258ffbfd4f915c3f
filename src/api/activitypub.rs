//! ActivityPub endpoints
//!
//! - Actor profile
//! - The single published activity and its object view

use axum::{
    Router,
    extract::{Path, State},
    response::Json,
    routing::get,
};

use crate::AppState;
use crate::documents::{ActivityDocument, ActorDocument, NoteDocument};
use crate::error::AppError;

/// Create ActivityPub router
///
/// Routes:
/// - GET /user/:name - Actor profile
/// - GET /activity/:id - Create activity document
/// - GET /post/:id - Object (Note) document
pub fn activitypub_router() -> Router<AppState> {
    Router::new()
        .route("/user/:name", get(actor))
        .route("/activity/:id", get(activity))
        .route("/post/:id", get(post))
}

/// GET /user/:name
///
/// Returns the ActivityPub Actor document for the single local identity.
async fn actor(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ActorDocument>, AppError> {
    if name != state.identity.name {
        return Err(AppError::UserNotFound);
    }

    Ok(Json(state.documents.actor(&state.identity)))
}

/// GET /activity/:id
///
/// Returns the full Create activity document.
async fn activity(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ActivityDocument>, AppError> {
    let activity = state
        .repository
        .activity_by_id(&id)
        .ok_or(AppError::PostNotFound)?;

    Ok(Json(state.documents.activity(activity, &state.identity.name)))
}

/// GET /post/:id
///
/// Returns the object view only, not the activity envelope.
async fn post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<NoteDocument>, AppError> {
    let note = state
        .repository
        .note_by_id(&id)
        .ok_or(AppError::PostNotFound)?;

    Ok(Json(state.documents.note(note, &state.identity.name)))
}
