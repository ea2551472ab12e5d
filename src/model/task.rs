use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single entry in a day's task list.
///
/// Tasks carry no surrogate key: within one day the `(created_at, title)`
/// pair identifies a task (see [`TaskKey`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Task title text
    pub title: String,
    /// Checkbox state
    #[serde(default)]
    pub completed: bool,
    /// Instant the task was created; stamped once, never edited
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Create an incomplete task stamped with the given instant
    pub fn new(title: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Task {
            title: title.into(),
            completed: false,
            created_at,
        }
    }

    /// The identity of this task as displayed
    pub fn key(&self) -> TaskKey {
        TaskKey {
            created_at: self.created_at,
            title: self.title.clone(),
        }
    }

    /// Checkbox text for list output
    pub fn checkbox(&self) -> &'static str {
        if self.completed { "[x]" } else { "[ ]" }
    }
}

/// Field-match identity of a task: a displayed row resolves back to its
/// source record by exact `(created_at, title)` equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskKey {
    pub created_at: DateTime<Utc>,
    pub title: String,
}

impl TaskKey {
    pub fn matches(&self, task: &Task) -> bool {
        task.created_at == self.created_at && task.title == self.title
    }
}
