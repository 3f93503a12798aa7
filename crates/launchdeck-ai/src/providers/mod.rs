//! Generation service implementations

pub mod google;

use crate::{Error, FragmentStream, Result};
use async_trait::async_trait;

/// A remote text-generation service that hands out conversational sessions
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Open a session bound to a fixed system instruction
    async fn create_session(&self, system_instruction: &str) -> Result<Box<dyn ChatSession>>;
}

/// An opaque server-side conversation.
///
/// The session accumulates its own history as a side effect of `send` and
/// `send_streaming`; callers never see or edit it.
#[async_trait]
pub trait ChatSession: Send + Sync {
    /// The instruction this session was created with
    fn system_instruction(&self) -> &str;

    /// Send a turn and wait for the complete reply
    async fn send(&self, text: &str) -> Result<String>;

    /// Send a turn and receive the reply as incremental fragments
    async fn send_streaming(&self, text: &str) -> Result<FragmentStream>;
}

/// Environment variables checked for a Gemini API key, in order
pub const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "GOOGLE_API_KEY", "API_KEY"];

/// Get an API key from a provided value or the environment
pub fn get_api_key(provided: Option<&str>) -> Result<String> {
    if let Some(key) = provided.filter(|k| !k.trim().is_empty()) {
        return Ok(key.to_string());
    }

    API_KEY_ENV_VARS
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|v| !v.trim().is_empty()))
        .ok_or(Error::InvalidApiKey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provided_key_wins() {
        assert_eq!(get_api_key(Some("abc")).unwrap(), "abc");
    }
}
