//! Conversation turns as shown in the assistant panel

use launchdeck_ai::Role;
use serde::{Deserialize, Serialize};

/// One visible message in the assistant panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub text: String,
    /// Creation time in milliseconds since the epoch
    #[serde(default)]
    pub timestamp: i64,
}

impl ConversationTurn {
    /// Create a user turn
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    /// Create a model turn
    pub fn model(text: impl Into<String>) -> Self {
        Self::new(Role::Model, text)
    }

    fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// A copy of this turn carrying new text
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..self.clone()
        }
    }

    /// Whether this turn was written by the user
    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}
