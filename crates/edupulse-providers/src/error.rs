//! Provider error types.

use thiserror::Error;

/// Errors that can occur when calling a text-generation service.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No API key was configured.
    #[error("missing API credential for {0}")]
    MissingCredential(&'static str),

    /// The API returned a 429 rate limit response.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    /// Authentication failed (invalid API key).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The requested model was not found.
    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The API answered 2xx but the body was not usable.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),
}
