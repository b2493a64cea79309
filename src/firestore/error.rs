//! Content database error types.

/// Errors that can occur while talking to the document database.
#[derive(Debug, thiserror::Error)]
pub enum FirestoreError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to deserialize API response
    #[error("Failed to deserialize API response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// A typed value could not be converted
    #[error("Malformed document value: {0}")]
    MalformedValue(String),

    /// Write attempted without a signed-in session
    #[error("Not signed in")]
    NotSignedIn,

    /// Document not found
    #[error("Document not found: {path}")]
    NotFound { path: String },
}
