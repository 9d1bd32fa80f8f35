use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

pub const DEFAULT_TASK_CATEGORY: &str = "personal";

#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub String);

impl TaskId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub category: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub due_at: Option<OffsetDateTime>,
    pub completed: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Task {
    /// Case-insensitive substring match over title and category.
    /// `needle` must already be lowercased.
    pub fn matches_search(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.title.to_lowercase().contains(needle)
            || self.category.to_lowercase().contains(needle)
    }

    pub fn is_overdue(&self, now: OffsetDateTime) -> bool {
        !self.completed && self.due_at.is_some_and(|due| due < now)
    }
}

/// User-entered fields for a new task.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub category: Option<String>,
    pub due_at: Option<OffsetDateTime>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_due_at(mut self, due_at: OffsetDateTime) -> Self {
        self.due_at = Some(due_at);
        self
    }
}

/// Partial update; `None` leaves a field untouched. `due_at: Some(None)`
/// clears the due date.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub category: Option<String>,
    pub due_at: Option<Option<OffsetDateTime>>,
    pub completed: Option<bool>,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Whole percent, 0 when there are no tasks.
    pub completion_rate: u32,
}

impl TaskStats {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|task| task.completed).count();
        let completion_rate = if total == 0 {
            0
        } else {
            ((completed as f64 / total as f64) * 100.0).round() as u32
        };
        Self {
            total,
            completed,
            pending: total - completed,
            completion_rate,
        }
    }
}

pub fn normalize_category(raw: Option<&str>) -> String {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => value.to_lowercase(),
        None => DEFAULT_TASK_CATEGORY.to_string(),
    }
}
