//! Irontree - A minimal single-actor ActivityPub publisher
//!
//! Publishes one identity and one Create/Note pair as ActivityStreams
//! JSON-LD, answers WebFinger discovery, and delivers the activity once
//! to a configured remote inbox with an HTTP Signature.
//!
//! # Modules
//!
//! - `api`: HTTP handlers for actor/activity/object documents and WebFinger
//! - `federation`: outbound HTTP Signature computation and delivery
//! - `documents`: typed ActivityStreams / JRD document construction
//! - `model`: the immutable identity and activity records
//! - `keys`: startup RSA keypair generation
//! - `config`: configuration management
//! - `error`: error types

pub mod api;
pub mod config;
pub mod documents;
pub mod error;
pub mod federation;
pub mod keys;
pub mod model;

use std::sync::Arc;

/// Application state shared across all handlers
///
/// Built once after keypair generation; every field is read-only from
/// then on, so cloning per request needs no locking.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<config::AppConfig>,

    /// The single local actor
    pub identity: Arc<model::Identity>,

    /// The one published activity
    pub repository: Arc<model::ActivityRepository>,

    /// Document builder for the configured base URL
    pub documents: Arc<documents::Documents>,

    /// HTTP client for federation
    pub http_client: Arc<reqwest::Client>,
}

impl AppState {
    /// Initialize application state from a fully populated identity.
    ///
    /// The identity must exist before this runs: the activity embeds the
    /// actor URI, and the delivery client signs with the private key.
    /// Keypair generation therefore happens in `main`, ahead of this.
    pub fn new(config: config::AppConfig, identity: model::Identity) -> error::Result<Self> {
        let documents = documents::Documents::new(
            config.server.base_url(),
            config.federation.target.clone(),
        );

        let activity = model::CreateActivity::new(
            documents.actor_url(&identity.name),
            config.identity.status_content(),
        );

        tracing::info!(
            activity_id = %activity.id,
            note_id = %activity.object.id,
            "Activity created"
        );

        let http_client = reqwest::Client::builder()
            .user_agent(concat!("Irontree/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| error::AppError::Internal(e.into()))?;

        Ok(Self {
            config: Arc::new(config),
            identity: Arc::new(identity),
            repository: Arc::new(model::ActivityRepository::new(activity)),
            documents: Arc::new(documents),
            http_client: Arc::new(http_client),
        })
    }

    /// Build the delivery client for the configured federation target.
    pub fn delivery(&self) -> error::Result<federation::ActivityDelivery> {
        Ok(federation::ActivityDelivery::new(
            self.http_client.clone(),
            self.config.federation.target.inbox_uri.clone(),
            self.config.federation.target.inbox_host()?,
            self.documents.key_id(&self.identity.name),
            self.identity.private_key_pem.clone(),
        ))
    }
}

/// Build the axum router with all routes.
///
/// Shared by the binary and integration tests to keep route composition
/// consistent across environments.
pub fn build_router(state: AppState) -> axum::Router {
    use axum::Router;
    use tower_http::trace::TraceLayer;

    Router::new()
        .merge(api::activitypub_router())
        .merge(api::wellknown_router())
        .fallback(unmatched)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Catch-all for paths outside the published surface.
async fn unmatched(uri: axum::http::Uri) -> (axum::http::StatusCode, &'static str) {
    tracing::debug!(%uri, "Request on unmatched url");
    (
        axum::http::StatusCode::NOT_FOUND,
        "Error, nothing to do with this url",
    )
}
