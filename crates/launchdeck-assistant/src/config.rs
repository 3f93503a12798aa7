//! Assistant configuration and default texts

use std::time::Duration;

/// Instruction the session is created with
pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "You are an expert AI assistant for the AI-Solutions.Store launch.
Your role is to provide guidance, clarification, and automation support for the deployment checklist.
You must be an expert in DevOps, blockchain, smart contracts, legal compliance for tech startups, and full-stack development.
The user will provide the complete deployment plan. Refer to it to answer any questions. Be concise, helpful, and friendly.
When asked about a specific task (e.g., \"P1.1\"), refer to its action and requirement directly from the plan.";

/// Shown once priming succeeds
pub const DEFAULT_GREETING: &str =
    "Hello! I'm your AI Deployment Assistant. How can I help you with the launch process today?";

/// Shown when priming fails
pub const DEFAULT_PRIMING_APOLOGY: &str =
    "Sorry, I'm having trouble connecting right now. Please try again later.";

/// Shown when a reply stream fails
pub const DEFAULT_REPLY_APOLOGY: &str = "Oops! Something went wrong. Please try again.";

/// Session manager configuration
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    /// Fixed instruction for the session
    pub system_instruction: String,
    /// Synthetic model turn appended after priming
    pub greeting: String,
    /// Synthetic model turn appended when priming fails
    pub priming_apology: String,
    /// Synthetic model turn appended when a reply fails
    pub reply_apology: String,
    /// Upper bound on one reply, from request to last fragment.
    ///
    /// `None` waits forever.
    pub reply_timeout: Option<Duration>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            system_instruction: DEFAULT_SYSTEM_INSTRUCTION.to_string(),
            greeting: DEFAULT_GREETING.to_string(),
            priming_apology: DEFAULT_PRIMING_APOLOGY.to_string(),
            reply_apology: DEFAULT_REPLY_APOLOGY.to_string(),
            reply_timeout: None,
        }
    }
}

impl AssistantConfig {
    /// Override the system instruction
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = instruction.into();
        self
    }

    /// Bound each reply
    pub fn with_reply_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.reply_timeout = timeout;
        self
    }
}
