//! Deployment plan data and task toggling

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Plan shipped with the binary
const EMBEDDED_PLAN: &str = include_str!("checklist.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub action: String,
    pub requirement: String,
    #[serde(default)]
    pub refs: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub description: String,
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchitectureMetric {
    pub label: String,
    pub detail: String,
}

/// Headline business figures shown on the dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Metrics {
    pub revenue_streams: String,
    pub y1_projection: String,
    pub y3_projection: String,
    pub compliance_status: String,
    pub architecture: Vec<ArchitectureMetric>,
}

/// A plan file: metrics plus ordered sections
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub metrics: Metrics,
    pub sections: Vec<Section>,
}

impl Plan {
    /// The plan compiled into the binary
    pub fn embedded() -> anyhow::Result<Self> {
        serde_json::from_str(EMBEDDED_PLAN).context("embedded checklist is invalid")
    }

    /// Load a plan from a JSON file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read plan {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse plan {}", path.display()))
    }
}

/// Completion figures derived from the sections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressStats {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// Rounded to the nearest whole percent, 0 for an empty plan
    pub percentage: u16,
    pub completed_by_section: Vec<usize>,
}

impl ProgressStats {
    pub fn from_sections(sections: &[Section]) -> Self {
        let completed_by_section: Vec<usize> = sections
            .iter()
            .map(|s| s.tasks.iter().filter(|t| t.completed).count())
            .collect();
        let total_tasks = sections.iter().map(|s| s.tasks.len()).sum();
        let completed_tasks = completed_by_section.iter().sum();
        let percentage = if total_tasks == 0 {
            0
        } else {
            ((completed_tasks as f64 / total_tasks as f64) * 100.0).round() as u16
        };
        Self {
            total_tasks,
            completed_tasks,
            percentage,
            completed_by_section,
        }
    }
}

/// The live checklist.
///
/// Sections sit behind an `Arc`; clones share them until a toggle replaces
/// the affected task with an updated copy.
#[derive(Debug, Clone)]
pub struct Checklist {
    sections: Arc<Vec<Section>>,
}

impl Checklist {
    pub fn new(sections: Vec<Section>) -> Self {
        Self {
            sections: Arc::new(sections),
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Flip one task's completion.
    ///
    /// Returns the new completion value, or `None` if no such task exists.
    pub fn toggle_task(&mut self, section_id: &str, task_id: &str) -> Option<bool> {
        let (s, t) = self.sections.iter().enumerate().find_map(|(s, section)| {
            if section.id != section_id {
                return None;
            }
            section
                .tasks
                .iter()
                .position(|task| task.id == task_id)
                .map(|t| (s, t))
        })?;

        let sections = Arc::make_mut(&mut self.sections);
        let task = &sections[s].tasks[t];
        let updated = Task {
            completed: !task.completed,
            ..task.clone()
        };
        let completed = updated.completed;
        sections[s].tasks[t] = updated;
        tracing::debug!(section_id, task_id, completed, "Toggled task");
        Some(completed)
    }

    pub fn progress(&self) -> ProgressStats {
        ProgressStats::from_sections(&self.sections)
    }

    /// Number of tasks across all sections
    pub fn task_count(&self) -> usize {
        self.sections.iter().map(|s| s.tasks.len()).sum()
    }

    /// Task at a display-order index, with the index of its section
    pub fn task_at(&self, index: usize) -> Option<(usize, &Task)> {
        let mut remaining = index;
        for (s, section) in self.sections.iter().enumerate() {
            if remaining < section.tasks.len() {
                return Some((s, &section.tasks[remaining]));
            }
            remaining -= section.tasks.len();
        }
        None
    }

    /// Toggle the task at a display-order index
    pub fn toggle_at(&mut self, index: usize) -> Option<bool> {
        let (s, task) = self.task_at(index)?;
        let section_id = self.sections[s].id.clone();
        let task_id = task.id.clone();
        self.toggle_task(&section_id, &task_id)
    }
}
