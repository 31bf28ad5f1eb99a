//! Task editor form model.
//!
//! # Responsibility
//! - Convert a task into editable form state and back into `TaskFields`.
//! - Translate a checklist to and from one-item-per-line text.
//!
//! # Invariants
//! - Checklist text is split on newlines; lines are trimmed and blank lines
//!   dropped.
//! - Items rebuilt from text start unchecked: completion state is not carried
//!   across a bulk replace.

use crate::model::board::{ChecklistItem, Task, TaskFields, TaskLabel};
use chrono::NaiveDate;

/// Editable text form of a task, as shown in the edit dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub label: TaskLabel,
    /// `YYYY-MM-DD`, or empty for no date.
    pub due_date: String,
    /// One checklist item per line.
    pub checklist_text: String,
}

impl TaskDraft {
    /// Prefills the form from an existing task.
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            label: task.label,
            due_date: task
                .due_date
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            checklist_text: checklist_to_text(&task.checklist),
        }
    }

    /// Converts the form into replacement fields.
    ///
    /// The title is trimmed. An unparsable due date is treated as no date,
    /// matching what a date picker can submit.
    pub fn into_fields(self) -> TaskFields {
        let due_date = NaiveDate::parse_from_str(self.due_date.trim(), "%Y-%m-%d").ok();
        TaskFields {
            title: self.title.trim().to_string(),
            description: self.description,
            label: self.label,
            due_date,
            checklist: checklist_from_text(&self.checklist_text),
        }
    }
}

/// Joins checklist item texts with newlines.
pub fn checklist_to_text(items: &[ChecklistItem]) -> String {
    items
        .iter()
        .map(|item| item.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builds unchecked checklist items from editor text.
pub fn checklist_from_text(text: &str) -> Vec<ChecklistItem> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ChecklistItem::new)
        .collect()
}
