//! LLM error types

use thiserror::Error;

/// LLM-related errors
#[derive(Error, Debug)]
pub enum LlmError {
    /// API key rejected
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Quota or rate limit exceeded
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// API request failed
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Timeout
    #[error("Request timed out")]
    Timeout,

    /// The prompt or the completion was blocked by the service
    #[error("Request blocked: {0}")]
    Blocked(String),

    /// Invalid response from API
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// Non-success status with the service's own error message
    #[error("{status}: {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Message reported by the service
        message: String,
    },
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout
        } else if err.is_connect() {
            LlmError::ConnectionError(err.to_string())
        } else if err.is_decode() {
            LlmError::InvalidResponse(err.to_string())
        } else {
            LlmError::RequestFailed(err.to_string())
        }
    }
}
