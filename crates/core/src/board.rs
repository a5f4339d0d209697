//! Flattened and ordered projections of the project tree.
//!
//! Everything here is a pure function of the input slice; callers that
//! want caching layer it on top (the store does, keyed on its revision
//! counter).

use std::cmp::Reverse;

use chrono::NaiveDate;

use crate::filter::{contains_ci, TaskFilter};
use crate::note::Note;
use crate::project::Project;
use crate::task::{Task, TaskStatus};
use crate::types::EntityId;

/// A task annotated with its parent project's identity, as shown in the
/// cross-project list.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRow {
    pub task: Task,
    pub project_id: EntityId,
    pub project_name: String,
    pub project_color: String,
}

/// A project note annotated with its parent project, produced by the
/// note search.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteRow {
    pub note: Note,
    pub project_id: EntityId,
    pub project_name: String,
    pub project_color: String,
}

/// Board-level counters for the stats strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardStats {
    pub total: usize,
    pub overdue: usize,
    pub due_soon: usize,
    pub done: usize,
    pub projects: usize,
}

/// One row per task, in project order then task order.
pub fn flatten(projects: &[Project]) -> Vec<TaskRow> {
    projects
        .iter()
        .flat_map(|p| {
            p.tasks.iter().map(move |t| TaskRow {
                task: t.clone(),
                project_id: p.id,
                project_name: p.name.clone(),
                project_color: p.color.clone(),
            })
        })
        .collect()
}

/// Projects ordered for display: any project containing an overdue task
/// sorts before all others, ties break by reverse-lexicographic
/// case-insensitive name, and equal names keep their load order.
pub fn sort_projects(projects: &[Project], today: NaiveDate) -> Vec<Project> {
    let mut out = projects.to_vec();
    out.sort_by_cached_key(|p| {
        (
            Reverse(p.has_overdue_task(today)),
            Reverse(p.name.to_lowercase()),
        )
    });
    out
}

/// Apply `filter` to pre-flattened rows.
pub fn filter_tasks(rows: &[TaskRow], filter: &TaskFilter, today: NaiveDate) -> Vec<TaskRow> {
    rows.iter()
        .filter(|row| filter.matches(row, today))
        .cloned()
        .collect()
}

/// Project notes matching the filter's search text, annotated with their
/// project. Returns nothing when the search is blank: the notes panel
/// only surfaces during a search.
pub fn search_notes(projects: &[Project], filter: &TaskFilter) -> Vec<NoteRow> {
    let Some(q) = filter.query() else {
        return Vec::new();
    };
    projects
        .iter()
        .filter(|p| filter.project_id.is_none_or(|id| p.id == id))
        .flat_map(|p| {
            p.notes
                .iter()
                .filter(|n| {
                    filter.created_date_in_range(n.created_at.date_naive())
                        && (contains_ci(&n.text, &q)
                            || n.author.as_deref().is_some_and(|a| contains_ci(a, &q)))
                })
                .map(move |n| NoteRow {
                    note: n.clone(),
                    project_id: p.id,
                    project_name: p.name.clone(),
                    project_color: p.color.clone(),
                })
        })
        .collect()
}

impl BoardStats {
    /// Count tasks per status bucket across all projects.
    pub fn compute(projects: &[Project], today: NaiveDate) -> Self {
        let mut stats = BoardStats {
            projects: projects.len(),
            ..Default::default()
        };
        for task in projects.iter().flat_map(|p| p.tasks.iter()) {
            stats.total += 1;
            match task.status(today) {
                TaskStatus::Done => stats.done += 1,
                TaskStatus::Overdue => stats.overdue += 1,
                TaskStatus::DueSoon => stats.due_soon += 1,
                TaskStatus::OnTrack => {}
            }
        }
        stats
    }
}
