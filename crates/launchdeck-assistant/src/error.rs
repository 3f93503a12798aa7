//! Error types for launchdeck-assistant

use launchdeck_ai::ErrorKind;
use thiserror::Error;

/// Result type alias using launchdeck-assistant Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while priming a session or streaming a reply.
///
/// None of these escape to the presentation layer: the session manager turns
/// them into conversational turns and state transitions.
#[derive(Error, Debug)]
pub enum Error {
    /// An error from the generation service
    #[error(transparent)]
    Ai(#[from] launchdeck_ai::Error),

    /// The context payload could not be serialized
    #[error("Context serialization failed: {0}")]
    Context(#[from] serde_json::Error),
}

impl Error {
    /// Classify this error at the service boundary
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Ai(e) => e.kind(),
            Error::Context(_) => ErrorKind::ServiceError,
        }
    }
}
