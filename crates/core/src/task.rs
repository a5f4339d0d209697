//! Tasks and their calendar-date status classification.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::note::Comment;
use crate::types::{EntityId, Timestamp};

/// Tasks due within this many days (inclusive) classify as
/// [`TaskStatus::DueSoon`].
pub const DUE_SOON_WINDOW_DAYS: i64 = 3;

/// Maximum task title length.
pub const MAX_TASK_TITLE_LEN: usize = 500;

/// Urgency bucket of a task, derived from its due date and done flag.
///
/// Classification works on calendar dates only; time-of-day is dropped
/// before any comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Completed, regardless of due date.
    Done,
    /// Due date is strictly before today.
    Overdue,
    /// Due today or within [`DUE_SOON_WINDOW_DAYS`] days.
    DueSoon,
    /// No due date, or due date beyond the due-soon window.
    OnTrack,
}

impl TaskStatus {
    /// Classify a task.
    ///
    /// `done` wins over everything; a task with no due date can never be
    /// overdue.
    pub fn classify(due_date: Option<NaiveDate>, done: bool, today: NaiveDate) -> Self {
        if done {
            return TaskStatus::Done;
        }
        let Some(due) = due_date else {
            return TaskStatus::OnTrack;
        };
        let days_until = (due - today).num_days();
        if days_until < 0 {
            TaskStatus::Overdue
        } else if days_until <= DUE_SOON_WINDOW_DAYS {
            TaskStatus::DueSoon
        } else {
            TaskStatus::OnTrack
        }
    }

    /// Stable snake_case name, used for logs and CLI output.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Done => "done",
            TaskStatus::Overdue => "overdue",
            TaskStatus::DueSoon => "due_soon",
            TaskStatus::OnTrack => "on_track",
        }
    }
}

/// A task belonging to a project, with its comment thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: EntityId,
    pub project_id: EntityId,
    pub title: String,
    #[serde(default)]
    pub responsible: Option<String>,
    #[serde(with = "crate::dates::calendar_date_opt", default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub done: bool,
    /// Completion date. Non-`None` exactly when `done` is set.
    #[serde(with = "crate::dates::calendar_date_opt", default)]
    pub done_at: Option<NaiveDate>,
    pub created_at: Timestamp,
    #[serde(default)]
    pub comments: Vec<Comment>,
    /// Set while an optimistic insert awaits confirmation. Never
    /// serialized.
    #[serde(skip)]
    pub pending: bool,
}

impl Task {
    /// Status bucket of this task as of `today`.
    pub fn status(&self, today: NaiveDate) -> TaskStatus {
        TaskStatus::classify(self.due_date, self.done, today)
    }

    /// Look up a comment by id.
    pub fn comment(&self, comment_id: EntityId) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == comment_id)
    }
}

/// Payload for creating a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    pub project_id: EntityId,
    pub title: String,
    pub responsible: Option<String>,
    #[serde(with = "crate::dates::calendar_date_opt", default)]
    pub due_date: Option<NaiveDate>,
}

/// Payload for editing a task's fields. Toggling `done` is a separate
/// operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTask {
    pub title: String,
    pub responsible: Option<String>,
    #[serde(with = "crate::dates::calendar_date_opt", default)]
    pub due_date: Option<NaiveDate>,
}

/// Validate a task title: non-empty after trimming, bounded length.
pub fn validate_task_title(title: &str) -> Result<(), CoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Task title is required".to_string()));
    }
    if trimmed.len() > MAX_TASK_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Task title must be at most {MAX_TASK_TITLE_LEN} characters"
        )));
    }
    Ok(())
}
