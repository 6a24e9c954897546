//! Backend fetch error types.

use thiserror::Error;

/// Errors that can occur talking to the backend.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Failed to send the request at all.
    #[error("Request failed: {0}")]
    Request(String),

    /// The backend answered with an error status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The response body was not what we expected.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The request timed out.
    #[error("Request timed out")]
    Timeout,
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else {
            FetchError::Request(e.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}
