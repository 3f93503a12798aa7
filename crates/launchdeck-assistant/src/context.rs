//! Context payloads injected as the invisible first turn

use crate::error::Result;
use serde::Serialize;

/// Supplies the priming message sent once when a session is created
pub trait ContextSource: Send + Sync {
    /// Serialize the full context into a single message
    fn priming_message(&self) -> Result<String>;
}

/// A serializable payload introduced by a short preamble
#[derive(Debug, Clone)]
pub struct JsonContext<T> {
    preamble: String,
    payload: T,
}

impl<T: Serialize> JsonContext<T> {
    /// Wrap a payload
    pub fn new(preamble: impl Into<String>, payload: T) -> Self {
        Self {
            preamble: preamble.into(),
            payload,
        }
    }
}

impl<T: Serialize + Send + Sync> ContextSource for JsonContext<T> {
    fn priming_message(&self) -> Result<String> {
        let body = serde_json::to_string_pretty(&self.payload)?;
        Ok(format!("{}\n\n{}", self.preamble, body))
    }
}

impl ContextSource for String {
    fn priming_message(&self) -> Result<String> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Plan {
        id: &'static str,
    }

    #[test]
    fn test_json_context_format() {
        let ctx = JsonContext::new("Here is the plan:", vec![Plan { id: "P1.1" }]);
        let msg = ctx.priming_message().unwrap();
        assert!(msg.starts_with("Here is the plan:\n\n["));
        assert!(msg.contains("\"id\": \"P1.1\""));
    }

    #[test]
    fn test_plain_string_context() {
        let ctx = "static notes".to_string();
        assert_eq!(ctx.priming_message().unwrap(), "static notes");
    }
}
