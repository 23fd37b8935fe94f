//! spsync SharePoint - SharePoint REST API adapter
//!
//! Provides an async client for:
//! - Site, file and folder lookups over the SharePoint REST API
//! - File content download and upload
//! - Server-side move/copy and folder management
//! - Checkout / checkin / undo-checkout
//!
//! ## Modules
//!
//! - [`client`] - Authenticated HTTP client with throttling retry
//! - [`odata`] - Path literals, response payloads and `odata.error` parsing
//! - [`provider`] - [`IRemoteStore`](spsync_core::ports::IRemoteStore) implementation
//! - [`rate_limit`] - `Retry-After` handling for 429/503 responses

pub mod client;
pub mod odata;
pub mod provider;
pub mod rate_limit;

use std::time::Duration;

use spsync_core::ports::RemoteStoreError;
use thiserror::Error;

/// Errors that can occur when communicating with the SharePoint REST API
#[derive(Debug, Error)]
pub enum SharePointError {
    /// Access token missing, invalid or expired (401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Insufficient permissions for the requested operation (403)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The requested resource does not exist (404)
    #[error("{0}")]
    NotFound(String),

    /// The server refused the request shape, typically an unusable path (400)
    #[error("{0}")]
    BadRequest(String),

    /// Throttled and the retry budget is spent
    #[error("Too many requests, retry after {retry_after:?}")]
    TooManyRequests {
        /// Duration the server asked to wait
        retry_after: Duration,
    },

    /// Any other non-success status
    #[error("{message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Server message, from `odata.error` when present
        message: String,
    },

    /// A network-level error occurred
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// The API response could not be parsed or was malformed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<SharePointError> for RemoteStoreError {
    fn from(err: SharePointError) -> Self {
        match err {
            SharePointError::Unauthorized(_) => RemoteStoreError::Unauthenticated,
            // The session is valid; only this item is off limits.
            SharePointError::Forbidden(message) => RemoteStoreError::Rejected(message),
            SharePointError::NotFound(message) => RemoteStoreError::NotFound(message),
            SharePointError::BadRequest(message) => RemoteStoreError::MalformedPath(message),
            SharePointError::NetworkError(e) => RemoteStoreError::Transport(e.to_string()),
            other => RemoteStoreError::Rejected(other.to_string()),
        }
    }
}
