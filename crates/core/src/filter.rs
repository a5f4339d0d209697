//! Composable filter over the flattened task list.

use chrono::NaiveDate;

use crate::board::TaskRow;
use crate::task::TaskStatus;
use crate::types::EntityId;

/// Filter state for the board's task list. All criteria are combined
/// with AND; unset criteria match everything.
///
/// The default hides done tasks and applies no other constraint.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskFilter {
    /// Free-text search. Case-insensitive substring match against the
    /// task title, project name, responsible, and comment text/authors.
    pub search: String,
    /// Keep only tasks in this status bucket.
    pub status: Option<TaskStatus>,
    /// Keep only tasks of this project.
    pub project_id: Option<EntityId>,
    /// When `false` (the default), done tasks are hidden.
    pub show_done: bool,
    /// Inclusive lower bound on the task's creation calendar date.
    pub created_from: Option<NaiveDate>,
    /// Inclusive upper bound on the task's creation calendar date.
    pub created_to: Option<NaiveDate>,
}

impl TaskFilter {
    /// The search text normalized for matching; `None` when blank.
    pub fn query(&self) -> Option<String> {
        let q = self.search.trim().to_lowercase();
        if q.is_empty() {
            None
        } else {
            Some(q)
        }
    }

    /// Returns `true` if `row` passes every active criterion as of
    /// `today`.
    pub fn matches(&self, row: &TaskRow, today: NaiveDate) -> bool {
        let task = &row.task;

        if !self.show_done && task.done {
            return false;
        }
        if let Some(status) = self.status {
            if task.status(today) != status {
                return false;
            }
        }
        if let Some(project_id) = self.project_id {
            if row.project_id != project_id {
                return false;
            }
        }
        if !self.created_date_in_range(task.created_at.date_naive()) {
            return false;
        }
        if let Some(q) = self.query() {
            let hit = contains_ci(&task.title, &q)
                || contains_ci(&row.project_name, &q)
                || task.responsible.as_deref().is_some_and(|r| contains_ci(r, &q))
                || task.comments.iter().any(|c| {
                    contains_ci(&c.text, &q)
                        || c.author.as_deref().is_some_and(|a| contains_ci(a, &q))
                });
            if !hit {
                return false;
            }
        }
        true
    }

    /// Inclusive calendar-date range check, shared with the note search.
    pub fn created_date_in_range(&self, date: NaiveDate) -> bool {
        if let Some(from) = self.created_from {
            if date < from {
                return false;
            }
        }
        if let Some(to) = self.created_to {
            if date > to {
                return false;
            }
        }
        true
    }
}

/// Case-insensitive substring test.
pub(crate) fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}
