//! Error types for launchdeck-ai

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using launchdeck-ai Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to the generation service
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned an error response
    #[error("API error: {message} (type: {error_type})")]
    Api { error_type: String, message: String },

    /// Rate limit exceeded
    #[error("Rate limited: retry after {retry_after:?} seconds")]
    RateLimited { retry_after: Option<u64> },

    /// Invalid API key
    #[error("Invalid or missing API key")]
    InvalidApiKey,

    /// The remote could not be reached or refused to open a session
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Server-sent events error
    #[error("SSE error: {0}")]
    Sse(String),

    /// A streamed chunk could not be decoded
    #[error("Malformed fragment: {0}")]
    MalformedFragment(String),

    /// Unexpected response format
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// The reply did not finish within the configured bound
    #[error("Timed out after {0:?}")]
    TimedOut(std::time::Duration),
}

/// Coarse failure classes exposed at the service boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The remote could not be reached or rejected the request outright
    ServiceUnavailable,
    /// The remote answered, but with an error or garbage
    ServiceError,
}

impl Error {
    /// Create an API error from type and message
    pub fn api(error_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            error_type: error_type.into(),
            message: message.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Http(e) if e.is_connect() || e.is_timeout() => ErrorKind::ServiceUnavailable,
            Error::InvalidApiKey | Error::ServiceUnavailable(_) => ErrorKind::ServiceUnavailable,
            Error::Api { error_type, .. } => {
                // 401/403/503 mean the service never took the request
                if matches!(
                    error_type.as_str(),
                    "http_401" | "http_403" | "http_503" | "unauthenticated" | "permission_denied"
                ) {
                    ErrorKind::ServiceUnavailable
                } else {
                    ErrorKind::ServiceError
                }
            }
            _ => ErrorKind::ServiceError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_variants() {
        assert_eq!(Error::InvalidApiKey.kind(), ErrorKind::ServiceUnavailable);
        assert_eq!(
            Error::ServiceUnavailable("refused".into()).kind(),
            ErrorKind::ServiceUnavailable
        );
    }

    #[test]
    fn test_api_status_classification() {
        assert_eq!(
            Error::api("http_503", "overloaded").kind(),
            ErrorKind::ServiceUnavailable
        );
        assert_eq!(
            Error::api("http_401", "bad key").kind(),
            ErrorKind::ServiceUnavailable
        );
        assert_eq!(
            Error::api("http_400", "bad request").kind(),
            ErrorKind::ServiceError
        );
        assert_eq!(
            Error::api("INVALID_ARGUMENT", "nope").kind(),
            ErrorKind::ServiceError
        );
    }

    #[test]
    fn test_stream_errors_are_service_errors() {
        assert_eq!(
            Error::MalformedFragment("{".into()).kind(),
            ErrorKind::ServiceError
        );
        assert_eq!(Error::Sse("reset".into()).kind(), ErrorKind::ServiceError);
        assert_eq!(
            Error::TimedOut(std::time::Duration::from_secs(1)).kind(),
            ErrorKind::ServiceError
        );
    }

    #[test]
    fn test_display_includes_message() {
        let e = Error::api("http_500", "internal");
        assert_eq!(e.to_string(), "API error: internal (type: http_500)");
    }
}
