//! To-do task record model.
//!
//! # Invariants
//! - `description` is never blank after create/update.
//! - `priority` is free text; `low|medium|high` are expected but not enforced.

use super::{apply_required, require, FieldChange, Record, RecordId, ValidationError};
use serde::{Deserialize, Serialize};

/// Priority assigned when none is given.
pub const DEFAULT_PRIORITY: &str = "medium";

/// Priorities the shell suggests to the user.
pub const KNOWN_PRIORITIES: &[&str] = &["low", "medium", "high"];

/// `low/medium/high`, as shown in priority prompts.
pub fn priority_choices() -> String {
    KNOWN_PRIORITIES.join("/")
}

fn default_priority() -> String {
    DEFAULT_PRIORITY.to_string()
}

/// One entry of the to-do list, as persisted in `todo.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: RecordId,
    pub description: String,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default = "default_priority")]
    pub priority: String,
    #[serde(default)]
    pub completed: bool,
    pub created_at: String,
}

impl Record for Task {
    const KIND: &'static str = "task";

    fn id(&self) -> RecordId {
        self.id
    }
}

impl Task {
    /// Priority with its first letter upper-cased, for display.
    pub fn priority_label(&self) -> String {
        let mut chars = self.priority.chars();
        match chars.next() {
            Some(first) => first
                .to_uppercase()
                .chain(chars.flat_map(char::to_lowercase))
                .collect(),
            None => String::new(),
        }
    }
}

/// Field values for a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub description: String,
    pub due_date: Option<String>,
    pub priority: String,
}

impl NewTask {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            due_date: None,
            priority: default_priority(),
        }
    }

    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = priority.into();
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require("description", &self.description)
    }

    pub(crate) fn into_task(self, id: RecordId, now: String) -> Task {
        let priority = if self.priority.trim().is_empty() {
            default_priority()
        } else {
            self.priority
        };
        Task {
            id,
            description: self.description,
            due_date: self.due_date,
            priority,
            completed: false,
            created_at: now,
        }
    }
}

/// Partial update for an existing task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub description: Option<String>,
    pub due_date: FieldChange<String>,
    pub priority: Option<String>,
}

impl TaskPatch {
    pub(crate) fn apply_to(self, task: &mut Task) {
        apply_required(self.description, &mut task.description);
        self.due_date.apply(&mut task.due_date);
        apply_required(self.priority, &mut task.priority);
    }
}

/// Which tasks a listing should include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl TaskFilter {
    pub fn accepts(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Pending => !task.completed,
            Self::Completed => task.completed,
        }
    }
}
