//! Session lifecycle states

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the assistant session is in its lifecycle.
///
/// ```text
/// Uninitialized -> Priming -> Ready <-> AwaitingReply
///                         \-> Failed
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No session exists yet
    #[default]
    Uninitialized,
    /// Session created, context being sent
    Priming,
    /// Idle and accepting input
    Ready,
    /// A reply is streaming in
    AwaitingReply,
    /// Priming failed; the session was discarded
    Failed,
}

impl SessionState {
    /// Whether a user submission may start now
    pub fn accepts_input(&self) -> bool {
        matches!(self, SessionState::Ready)
    }

    /// Whether an outbound request is in flight
    pub fn is_busy(&self) -> bool {
        matches!(self, SessionState::Priming | SessionState::AwaitingReply)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionState::Uninitialized => "idle",
            SessionState::Priming => "connecting",
            SessionState::Ready => "ready",
            SessionState::AwaitingReply => "thinking",
            SessionState::Failed => "offline",
        };
        f.write_str(label)
    }
}
