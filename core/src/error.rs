//! Error types for the Pet Friends client.
//!
//! # Design
//! HTTP statuses are not errors here: every response the service sends comes
//! back as an `ApiResponse` and the caller asserts on it. `ApiError` covers
//! what happens before or around the round-trip (transport, local photo
//! files, bad base URL) plus the typed view `ApiResponse::json`.

use std::io;
use std::path::PathBuf;

/// Errors returned by `PetFriends` and `ApiResponse::json`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (DNS, connect, I/O), or
    /// a multipart part could not be assembled.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A photo asset could not be read from disk.
    #[error("failed to read photo {}: {source}", .path.display())]
    Photo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configured base URL is not an absolute http(s) URL.
    #[error("invalid base url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A typed view was requested on a non-2xx response.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),
}
