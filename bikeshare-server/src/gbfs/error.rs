//! Feed client error types.

/// Errors that can occur when fetching a GBFS document.
///
/// None of these are retried; each one ends the fetch that raised it.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Publisher returned a non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Document did not match the expected schema
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Client could not be constructed from its configuration
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
}
