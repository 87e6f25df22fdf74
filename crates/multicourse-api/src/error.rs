//! Restaurant backend errors.

use multicourse_core::CoreError;
use thiserror::Error;

/// Errors that can occur when talking to the restaurant backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure: DNS, connect, TLS, timeout.
    #[error("Request failed: {0}")]
    Request(String),

    /// Server answered with a non-success status.
    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Base URL or endpoint could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Client could not be constructed.
    #[error("Client configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// True for failures that happened before any response arrived.
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Request(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Request(err.to_string())
        }
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        ApiError::InvalidUrl(err.to_string())
    }
}

/// Network failures reach use cases as generic data errors.
impl From<ApiError> for CoreError {
    fn from(err: ApiError) -> Self {
        tracing::warn!(error = %err, "Backend call failed");
        CoreError::Data(err.to_string())
    }
}

/// Result type for backend calls.
pub type ApiResult<T> = Result<T, ApiError>;
