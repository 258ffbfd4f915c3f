//! Well-known endpoints
//!
//! - /.well-known/webfinger

use axum::{
    Router,
    extract::{Query, State},
    response::Json,
    routing::get,
};
use serde::Deserialize;

use crate::AppState;
use crate::documents::WebFingerResponse;
use crate::error::AppError;

/// Create well-known router
///
/// Routes:
/// - GET /.well-known/webfinger
pub fn wellknown_router() -> Router<AppState> {
    Router::new().route("/.well-known/webfinger", get(webfinger))
}

/// WebFinger query parameters
///
/// `resource` is optional here so that a missing parameter surfaces as an
/// explicit 400 instead of an axum extractor rejection.
#[derive(Debug, Deserialize)]
struct WebFingerQuery {
    resource: Option<String>,
}

/// GET /.well-known/webfinger
///
/// Responds to WebFinger queries for the local account.
///
/// Query: ?resource=acct:username@domain
///
/// The host part of the `acct:` identifier is accepted but not checked
/// against the configured domain.
async fn webfinger(
    State(state): State<AppState>,
    Query(query): Query<WebFingerQuery>,
) -> Result<Json<WebFingerResponse>, AppError> {
    let resource = query.resource.ok_or_else(|| {
        AppError::MalformedQuery("Missing 'resource' query parameter".to_string())
    })?;

    let acct = resource.strip_prefix("acct:").ok_or_else(|| {
        AppError::MalformedQuery("Resource must start with 'acct:'".to_string())
    })?;

    let (username, _host) = acct
        .split_once('@')
        .ok_or_else(|| AppError::MalformedQuery("Invalid acct format".to_string()))?;

    if username != state.identity.name {
        return Err(AppError::UserNotFound);
    }

    Ok(Json(state.documents.webfinger(acct, username)))
}
