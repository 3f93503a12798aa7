//! Assistant event types

use crate::{conversation::ConversationTurn, state::SessionState};
use launchdeck_ai::ErrorKind;
use serde::{Deserialize, Serialize};

/// Events emitted whenever the assistant panel state changes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssistantEvent {
    /// Lifecycle transition
    StateChanged { from: SessionState, to: SessionState },

    /// A turn was added to the end of the list
    TurnAppended { index: usize, turn: ConversationTurn },

    /// The in-progress turn received more text
    TurnUpdated { index: usize, text: String },

    /// The panel was shown or hidden
    VisibilityChanged { visible: bool },

    /// The staged input text changed
    PendingInputChanged { text: String },

    /// A service failure was absorbed into the conversation
    Error { kind: ErrorKind, message: String },
}

impl AssistantEvent {
    /// Whether the turn list changed (the view should follow the newest turn)
    pub fn moves_transcript(&self) -> bool {
        matches!(
            self,
            AssistantEvent::TurnAppended { .. } | AssistantEvent::TurnUpdated { .. }
        )
    }
}
