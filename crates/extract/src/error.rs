//! Errors raised while talking to the extraction and embedding services.

/// Error type for collaborator calls.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Errors that can occur while extracting metadata or embedding text.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// Media file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Request failed before a response arrived
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Service answered with a non-success status
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message reported by the service, or the raw body
        message: String,
    },

    /// Response parsed but lacked the expected field
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// No API key configured
    #[error("No API key configured (set VIDQC_API_KEY)")]
    MissingApiKey,
}
