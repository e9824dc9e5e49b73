//! Error types for the niconico Live client
//!
//! Provides one error enum covering every failure stage of a fetch,
//! so callers can tell a transport problem from a page-structure change.

use reqwest::StatusCode;
use thiserror::Error;

/// Error type for all niconico Live client operations
///
/// Each variant corresponds to one stage of the fetch/decode pipeline;
/// nothing is retried or recovered internally.
#[derive(Error, Debug)]
pub enum NicoliveError {
    /// Session token could not be encoded as a cookie header value.
    /// The token itself is never echoed into the message.
    #[error("user session token is not a valid cookie value")]
    InvalidSession,

    /// HTTP request failed (DNS, connection, TLS, cancellation)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a status other than 200
    #[error("unexpected status code: {0}")]
    UnexpectedStatus(StatusCode),

    /// The embedded-data payload was not found in the page.
    /// Usually means the page structure changed upstream or the
    /// session is invalid and a different page was rendered.
    #[error("embedded data not found: {0}")]
    DataNotFound(String),

    /// Extracted payload did not match the expected JSON shape
    #[error("failed to decode embedded data: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type alias for niconico Live client operations
pub type Result<T> = std::result::Result<T, NicoliveError>;
