//! launchdeck-assistant: the assistant panel's session manager
//!
//! Owns one lazily created, context-primed chat session per panel instance,
//! streams replies into a growing placeholder turn, and turns every service
//! failure into a friendly conversational message.

pub mod aggregator;
pub mod config;
pub mod context;
pub mod conversation;
pub mod error;
pub mod events;
pub mod manager;
pub mod state;

pub use aggregator::FragmentAccumulator;
pub use config::AssistantConfig;
pub use context::{ContextSource, JsonContext};
pub use conversation::ConversationTurn;
pub use error::{Error, Result};
pub use events::AssistantEvent;
pub use manager::{OpenOutcome, Rejection, SessionManager, SubmitOutcome};
pub use state::SessionState;
