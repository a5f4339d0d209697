//! Errors from the remote HTTP layer.

/// Errors produced by [`crate::TrackerApi`] implementations.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// The HTTP request itself failed (network, DNS, TLS, decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server rejected the operation with a non-2xx status.
    #[error("Server error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message from the server's `{"error": ...}` body, or the raw
        /// body text when it is not JSON.
        message: String,
    },

    /// The server rejected the session token (HTTP 401).
    ///
    /// Host applications treat this as a signal to drop the stored
    /// session and return to login; the store itself only rolls back
    /// and propagates.
    #[error("Session rejected: {0}")]
    Unauthorized(String),
}

impl RemoteError {
    /// Returns `true` for the session-invalidation signal.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, RemoteError::Unauthorized(_))
    }
}
