//! Inverse patches for failed optimistic mutations.
//!
//! Every mutating operation records, before touching the tree, the
//! steps that undo its local patch. Steps are recorded in the order the
//! forward actions run and applied in reverse, so compound patches
//! (e.g. unarchive: remove from one list, append to the other) unwind
//! correctly.
//!
//! Application is tolerant: a step whose target entity is gone does
//! nothing. Overlapping in-flight mutations may legitimately have
//! removed it (last-response-wins).

use chrono::NaiveDate;

use flowdeck_core::note::{Comment, Note};
use flowdeck_core::project::Project;
use flowdeck_core::task::Task;
use flowdeck_core::types::EntityId;

use crate::state::StoreState;

/// One reversible unit of a local patch.
#[derive(Debug, Clone)]
pub(crate) enum RollbackStep {
    /// Re-insert a project into the active list at `index`.
    InsertActiveProject { index: usize, project: Project },
    /// Re-insert a project into the archived list at `index`.
    InsertArchivedProject { index: usize, project: Project },
    /// Remove an optimistically inserted project from the active list.
    RemoveActiveProject { id: EntityId },
    /// Restore a project's editable fields.
    RestoreProjectMeta {
        id: EntityId,
        name: String,
        color: String,
    },
    /// Re-insert a task at `index` of its project's task list.
    InsertTask {
        project_id: EntityId,
        index: usize,
        task: Task,
    },
    /// Remove an optimistically inserted task.
    RemoveTask {
        project_id: EntityId,
        task_id: EntityId,
    },
    /// Restore a task's editable fields.
    RestoreTaskFields {
        project_id: EntityId,
        task_id: EntityId,
        title: String,
        responsible: Option<String>,
        due_date: Option<NaiveDate>,
    },
    /// Restore a task's exact completion state.
    RestoreTaskDone {
        project_id: EntityId,
        task_id: EntityId,
        done: bool,
        done_at: Option<NaiveDate>,
    },
    /// Re-insert a comment at `index` of its task's thread.
    InsertComment {
        project_id: EntityId,
        task_id: EntityId,
        index: usize,
        comment: Comment,
    },
    /// Remove an optimistically inserted comment.
    RemoveComment {
        project_id: EntityId,
        task_id: EntityId,
        comment_id: EntityId,
    },
    /// Restore a comment's text.
    RestoreCommentText {
        project_id: EntityId,
        task_id: EntityId,
        comment_id: EntityId,
        text: String,
    },
    /// Re-insert a note at `index` of its project's note list.
    InsertNote {
        project_id: EntityId,
        index: usize,
        note: Note,
    },
    /// Remove an optimistically inserted note.
    RemoveNote {
        project_id: EntityId,
        note_id: EntityId,
    },
    /// Restore a note's text.
    RestoreNoteText {
        project_id: EntityId,
        note_id: EntityId,
        text: String,
    },
}

/// Apply recorded steps in reverse order.
pub(crate) fn apply(state: &mut StoreState, steps: Vec<RollbackStep>) {
    for step in steps.into_iter().rev() {
        step.apply(state);
    }
}

impl RollbackStep {
    fn apply(self, state: &mut StoreState) {
        match self {
            RollbackStep::InsertActiveProject { index, project } => {
                let index = index.min(state.projects.len());
                state.projects.insert(index, project);
            }
            RollbackStep::InsertArchivedProject { index, project } => {
                let index = index.min(state.archived.len());
                state.archived.insert(index, project);
            }
            RollbackStep::RemoveActiveProject { id } => {
                state.projects.retain(|p| p.id != id);
            }
            RollbackStep::RestoreProjectMeta { id, name, color } => {
                if let Some(project) = state.project_mut(id) {
                    project.name = name;
                    project.color = color;
                }
            }
            RollbackStep::InsertTask {
                project_id,
                index,
                task,
            } => {
                if let Some(project) = state.project_mut(project_id) {
                    let index = index.min(project.tasks.len());
                    project.tasks.insert(index, task);
                }
            }
            RollbackStep::RemoveTask {
                project_id,
                task_id,
            } => {
                if let Some(project) = state.project_mut(project_id) {
                    project.tasks.retain(|t| t.id != task_id);
                }
            }
            RollbackStep::RestoreTaskFields {
                project_id,
                task_id,
                title,
                responsible,
                due_date,
            } => {
                if let Some(task) = state.task_mut(project_id, task_id) {
                    task.title = title;
                    task.responsible = responsible;
                    task.due_date = due_date;
                }
            }
            RollbackStep::RestoreTaskDone {
                project_id,
                task_id,
                done,
                done_at,
            } => {
                if let Some(task) = state.task_mut(project_id, task_id) {
                    task.done = done;
                    task.done_at = done_at;
                }
            }
            RollbackStep::InsertComment {
                project_id,
                task_id,
                index,
                comment,
            } => {
                if let Some(task) = state.task_mut(project_id, task_id) {
                    let index = index.min(task.comments.len());
                    task.comments.insert(index, comment);
                }
            }
            RollbackStep::RemoveComment {
                project_id,
                task_id,
                comment_id,
            } => {
                if let Some(task) = state.task_mut(project_id, task_id) {
                    task.comments.retain(|c| c.id != comment_id);
                }
            }
            RollbackStep::RestoreCommentText {
                project_id,
                task_id,
                comment_id,
                text,
            } => {
                if let Some(comment) = state.comment_mut(project_id, task_id, comment_id) {
                    comment.text = text;
                }
            }
            RollbackStep::InsertNote {
                project_id,
                index,
                note,
            } => {
                if let Some(project) = state.project_mut(project_id) {
                    let index = index.min(project.notes.len());
                    project.notes.insert(index, note);
                }
            }
            RollbackStep::RemoveNote {
                project_id,
                note_id,
            } => {
                if let Some(project) = state.project_mut(project_id) {
                    project.notes.retain(|n| n.id != note_id);
                }
            }
            RollbackStep::RestoreNoteText {
                project_id,
                note_id,
                text,
            } => {
                if let Some(note) = state.note_mut(project_id, note_id) {
                    note.text = text;
                }
            }
        }
    }
}
