//! Priming context built from the deployment plan

use crate::checklist::Section;
use launchdeck_assistant::{ContextSource, JsonContext};

const PREAMBLE: &str = "Here is the deployment plan for AI-Solutions.Store:";

/// The plan as the assistant sees it: every section and task, pretty-printed.
///
/// Built once from the plan as loaded, so toggles made later are not reflected.
pub struct ChecklistContext {
    inner: JsonContext<Vec<Section>>,
}

impl ChecklistContext {
    pub fn new(sections: Vec<Section>) -> Self {
        Self {
            inner: JsonContext::new(PREAMBLE, sections),
        }
    }
}

impl ContextSource for ChecklistContext {
    fn priming_message(&self) -> launchdeck_assistant::Result<String> {
        self.inner.priming_message()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checklist::Plan;

    #[test]
    fn test_message_carries_whole_plan() {
        let plan = Plan::embedded().unwrap();
        let context = ChecklistContext::new(plan.sections);
        let message = context.priming_message().unwrap();

        assert!(message.starts_with(PREAMBLE));
        assert!(message.contains("\"id\": \"P1.1\""));
        assert!(message.contains("\"id\": \"Z6.5\""));
        assert!(message.contains("\"completed\": false"));
    }
}
