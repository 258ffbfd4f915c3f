//! Activity delivery
//!
//! Sends the one startup activity to the configured remote inbox.

use std::sync::Arc;

use crate::documents::ActivityDocument;
use crate::error::AppError;

/// Activity delivery service
///
/// Assembles and POSTs one signed activity. Single-shot: no retry, no
/// delivery confirmation, and failure never affects the server.
#[derive(Clone)]
pub struct ActivityDelivery {
    http_client: Arc<reqwest::Client>,
    /// Target inbox URL
    inbox_uri: String,
    /// Host header value for the target
    inbox_host: String,
    /// Key ID for signatures (actor#main-key)
    key_id: String,
    /// Private key for signing
    private_key_pem: String,
}

impl ActivityDelivery {
    /// Create new delivery service
    pub fn new(
        http_client: Arc<reqwest::Client>,
        inbox_uri: String,
        inbox_host: String,
        key_id: String,
        private_key_pem: String,
    ) -> Self {
        Self {
            http_client,
            inbox_uri,
            inbox_host,
            key_id,
            private_key_pem,
        }
    }

    /// Deliver the activity to the configured inbox.
    ///
    /// Builds a `Date` header (RFC 2616 format, current time), signs it,
    /// and POSTs the serialized activity document with `Host`, `Date` and
    /// `Signature` headers.
    ///
    /// # Errors
    /// Returns error if signing or the network call fails, or the remote
    /// inbox rejects the activity.
    pub async fn deliver(&self, activity: &ActivityDocument) -> Result<(), AppError> {
        let body = serde_json::to_vec(activity)
            .map_err(|e| AppError::Federation(format!("Failed to serialize activity: {}", e)))?;

        let date = chrono::Utc::now()
            .format("%a, %d %b %Y %H:%M:%S GMT")
            .to_string();

        let signature = super::signature::signature_header(
            &self.private_key_pem,
            &self.key_id,
            &[("date", &date)],
        )?;

        let response = self
            .http_client
            .post(&self.inbox_uri)
            .header("Host", &self.inbox_host)
            .header("Date", date)
            .header("Signature", signature)
            .header("Content-Type", "application/activity+json")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                AppError::Federation(format!("Failed to deliver to {}: {}", self.inbox_uri, e))
            })?;

        let status = response.status();
        let response_body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(AppError::Federation(format!(
                "Inbox {} rejected activity: HTTP {}: {}",
                self.inbox_uri, status, response_body
            )));
        }

        tracing::info!(
            inbox = %self.inbox_uri,
            response = %response_body,
            "Activity sent"
        );
        Ok(())
    }
}
