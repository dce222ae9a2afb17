//! Persistence collaborator: saving newly clicked points to the backend.
//!
//! Client-side (hydrate): [`HttpPersistence`] POSTs the point to the page's
//! own endpoint via `gloo-net`, carrying the anti-forgery token header.
//! Hosts without a browser plug in their own [`Persistence`] implementation.
//!
//! ERROR HANDLING
//! ==============
//! Every failure mode collapses into [`PersistError`]. The caller logs it
//! and moves on: there is no retry and no rollback of the rendered marker.

#[cfg(test)]
#[path = "persist_test.rs"]
mod persist_test;

use async_trait::async_trait;

use crate::point::{SaveAck, SavePayload};

/// Error returned by a [`Persistence`] save.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersistError {
    /// The request never produced a response (network failure, CORS, abort).
    #[error("save request failed: {0}")]
    Transport(String),
    /// The backend answered with a non-2xx status.
    #[error("save rejected with status {0}")]
    Status(u16),
    /// The response body was not a save acknowledgement.
    #[error("malformed save response: {0}")]
    Decode(String),
    /// The backend answered `success: false`.
    #[error("backend did not confirm the save")]
    Rejected,
}

/// A single request-response save operation.
///
/// Single-threaded: implementations run on the browser event loop and need
/// not be `Send`.
#[async_trait(?Send)]
pub trait Persistence {
    /// Persist one point in normalized coordinates.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistError`] describing why the point was not saved.
    async fn save(&self, payload: SavePayload) -> Result<SaveAck, PersistError>;
}

/// Validate a decoded acknowledgement.
///
/// # Errors
///
/// Returns [`PersistError::Rejected`] if the backend did not report success.
pub fn confirm(ack: SaveAck) -> Result<SaveAck, PersistError> {
    if ack.success { Ok(ack) } else { Err(PersistError::Rejected) }
}

/// Map an HTTP status to an error when it is not a success.
#[must_use]
pub fn status_error(status: u16) -> Option<PersistError> {
    if (200..300).contains(&status) { None } else { Some(PersistError::Status(status)) }
}

/// Headers sent with every save request.
#[cfg(any(test, feature = "hydrate"))]
fn request_headers<'a>(csrf_header: &'a str, csrf_token: &'a str) -> [(&'a str, &'a str); 2] {
    [("Content-Type", crate::consts::JSON_CONTENT_TYPE), (csrf_header, csrf_token)]
}

/// Saves points by POSTing JSON to the page endpoint.
#[cfg(feature = "hydrate")]
#[derive(Debug, Clone)]
pub struct HttpPersistence {
    endpoint: String,
    csrf_header: String,
    csrf_token: String,
}

#[cfg(feature = "hydrate")]
impl HttpPersistence {
    #[must_use]
    pub fn new(endpoint: String, csrf_header: String, csrf_token: String) -> Self {
        Self { endpoint, csrf_header, csrf_token }
    }
}

#[cfg(feature = "hydrate")]
#[async_trait(?Send)]
impl Persistence for HttpPersistence {
    async fn save(&self, payload: SavePayload) -> Result<SaveAck, PersistError> {
        let mut builder = gloo_net::http::Request::post(&self.endpoint);
        for (name, value) in request_headers(&self.csrf_header, &self.csrf_token) {
            builder = builder.header(name, value);
        }
        let resp = builder
            .json(&payload)
            .map_err(|e| PersistError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| PersistError::Transport(e.to_string()))?;
        if let Some(err) = status_error(resp.status()) {
            return Err(err);
        }
        let ack = resp
            .json::<SaveAck>()
            .await
            .map_err(|e| PersistError::Decode(e.to_string()))?;
        confirm(ack)
    }
}
