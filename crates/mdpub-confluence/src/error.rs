//! Error types for Confluence API operations.

use std::path::PathBuf;

/// Error from Confluence API operations.
///
/// Every HTTP variant carries the method and URL of the failed request.
#[derive(Debug, thiserror::Error)]
pub enum ConfluenceError {
    /// HTTP request failed (network error, TLS, unreadable response).
    #[error("{method} {url} failed: {source}")]
    HttpRequest {
        /// HTTP method.
        method: &'static str,
        /// Request URL without query string.
        url: String,
        /// Transport error.
        #[source]
        source: ureq::Error,
    },

    /// HTTP response error (server returned error status).
    #[error("{method} {url} returned HTTP {status}: {body}")]
    HttpResponse {
        /// HTTP method.
        method: &'static str,
        /// Request URL without query string.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// Local file to attach does not exist.
    #[error("attachment file not found: {}", path.display())]
    AttachmentNotFound {
        /// Missing file.
        path: PathBuf,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
