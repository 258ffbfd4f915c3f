//! Error types for Irontree
//!
//! All errors in the application are converted to `AppError`,
//! which implements `IntoResponse` for proper HTTP error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Application-wide error type
///
/// Lookup errors (`UserNotFound`, `PostNotFound`) are resolved at the
/// routing boundary and carry the exact plain-text bodies remote callers
/// see. Everything else follows the usual JSON error body convention.
#[derive(Debug, Error)]
pub enum AppError {
    /// Unknown user name in an actor or WebFinger lookup (404)
    #[error("Error, no such user")]
    UserNotFound,

    /// Unknown activity or object id (404)
    #[error("Error, no such post")]
    PostNotFound,

    /// WebFinger resource parameter missing or unparsable (400)
    #[error("Malformed query: {0}")]
    MalformedQuery(String),

    /// RSA keypair generation failed; fatal at startup (500)
    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    /// Signing string could not be signed (500)
    #[error("Signing error: {0}")]
    Signing(String),

    /// Outbound delivery to a remote inbox failed (502)
    #[error("Federation error: {0}")]
    Federation(String),

    /// HTTP client error (502)
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Configuration error (500)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal server error (500)
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl IntoResponse for AppError {
    /// Convert error to HTTP response
    ///
    /// The two not-found variants produce plain-text bodies, matching
    /// what callers of this server are documented to read on a miss.
    fn into_response(self) -> Response {
        use axum::Json;

        if matches!(self, AppError::UserNotFound | AppError::PostNotFound) {
            return (StatusCode::NOT_FOUND, self.to_string()).into_response();
        }

        let (status, error_message) = match &self {
            AppError::MalformedQuery(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Federation(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            AppError::HttpClient(_) => (StatusCode::BAD_GATEWAY, self.to_string()),
            AppError::Config(msg)
            | AppError::KeyGeneration(msg)
            | AppError::Signing(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
            AppError::UserNotFound | AppError::PostNotFound => unreachable!(),
        };

        let body = Json(serde_json::json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
