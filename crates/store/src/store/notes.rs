//! Comment and project-note operations, including the two cross-entity
//! moves.
//!
//! Moves are server-authoritative: the backend deletes the source row
//! and mints the destination row in one transaction, so the store only
//! patches after the response arrives -- remove-source and
//! insert-destination land in a single patch (one revision, one event),
//! and a failed move leaves the tree untouched.

use chrono::Utc;

use flowdeck_core::note::{validate_text, Comment, CreateComment, CreateNote, Note};
use flowdeck_core::types::EntityId;
use flowdeck_core::CoreError;

use crate::error::StoreError;
use crate::rollback::RollbackStep;

use super::ProjectStore;

impl ProjectStore {
    // ---- task comments ----

    /// Add a comment to a task.
    pub async fn create_comment(
        &self,
        project_id: EntityId,
        req: CreateComment,
    ) -> Result<Comment, StoreError> {
        validate_text(&req.text)?;

        let task_id = req.task_id;
        let temp_id = self.temp_ids.allocate();
        let provisional = Comment {
            id: temp_id,
            task_id,
            author: None,
            text: req.text.clone(),
            created_at: Utc::now(),
            pending: true,
        };

        let steps = self
            .patch("comment.created", Some(temp_id), move |state| {
                let task = state
                    .task_mut(project_id, task_id)
                    .ok_or(CoreError::not_found("task", task_id))?;
                task.comments.push(provisional);
                Ok(vec![RollbackStep::RemoveComment {
                    project_id,
                    task_id,
                    comment_id: temp_id,
                }])
            })
            .await?;

        match self.api.create_comment(&req).await {
            Ok(comment) => {
                let canonical = comment.clone();
                self.patch("comment.created.confirmed", Some(comment.id), move |state| {
                    if let Some(slot) = state.comment_mut(project_id, task_id, temp_id) {
                        *slot = canonical;
                    }
                    Ok(())
                })
                .await?;
                Ok(comment)
            }
            Err(err) => {
                let err = StoreError::from(err);
                self.roll_back("comment.created", Some(temp_id), steps, &err)
                    .await;
                Err(err)
            }
        }
    }

    /// Edit a comment's text.
    pub async fn update_comment(
        &self,
        project_id: EntityId,
        task_id: EntityId,
        comment_id: EntityId,
        text: &str,
    ) -> Result<Comment, StoreError> {
        validate_text(text)?;

        let steps = self
            .patch("comment.updated", Some(comment_id), |state| {
                let comment = state
                    .comment_mut(project_id, task_id, comment_id)
                    .ok_or(CoreError::not_found("comment", comment_id))?;
                let steps = vec![RollbackStep::RestoreCommentText {
                    project_id,
                    task_id,
                    comment_id,
                    text: comment.text.clone(),
                }];
                comment.text = text.to_string();
                Ok(steps)
            })
            .await?;

        match self.api.update_comment(comment_id, text).await {
            Ok(comment) => {
                let canonical = comment.clone();
                self.patch("comment.updated.confirmed", Some(comment_id), move |state| {
                    if let Some(slot) = state.comment_mut(project_id, task_id, comment_id) {
                        *slot = canonical;
                    }
                    Ok(())
                })
                .await?;
                Ok(comment)
            }
            Err(err) => {
                let err = StoreError::from(err);
                self.roll_back("comment.updated", Some(comment_id), steps, &err)
                    .await;
                Err(err)
            }
        }
    }

    /// Delete a comment.
    pub async fn delete_comment(
        &self,
        project_id: EntityId,
        task_id: EntityId,
        comment_id: EntityId,
    ) -> Result<(), StoreError> {
        let steps = self
            .patch("comment.deleted", Some(comment_id), |state| {
                let task = state
                    .task_mut(project_id, task_id)
                    .ok_or(CoreError::not_found("task", task_id))?;
                let index = task
                    .comments
                    .iter()
                    .position(|c| c.id == comment_id)
                    .ok_or(CoreError::not_found("comment", comment_id))?;
                let comment = task.comments.remove(index);
                Ok(vec![RollbackStep::InsertComment {
                    project_id,
                    task_id,
                    index,
                    comment,
                }])
            })
            .await?;

        if let Err(err) = self.api.delete_comment(comment_id).await {
            let err = StoreError::from(err);
            self.roll_back("comment.deleted", Some(comment_id), steps, &err)
                .await;
            return Err(err);
        }
        Ok(())
    }

    /// Promote a task comment to a project note (possibly on another
    /// project). The returned note is the freshly minted row.
    pub async fn move_comment_to_project(
        &self,
        project_id: EntityId,
        task_id: EntityId,
        comment_id: EntityId,
        target_project_id: EntityId,
    ) -> Result<Note, StoreError> {
        let result = self
            .api
            .move_comment_to_project(comment_id, target_project_id)
            .await?;
        let note = result.note.clone();

        self.patch("comment.moved", Some(comment_id), move |state| {
            if let Some(task) = state.task_mut(project_id, task_id) {
                task.comments.retain(|c| c.id != result.deleted_comment_id);
            }
            if let Some(project) = state.project_mut(target_project_id) {
                project.notes.push(result.note);
            }
            Ok(())
        })
        .await?;
        Ok(note)
    }

    // ---- project notes ----

    /// Add a note to a project.
    pub async fn create_note(&self, req: CreateNote) -> Result<Note, StoreError> {
        validate_text(&req.text)?;

        let project_id = req.project_id;
        let temp_id = self.temp_ids.allocate();
        let provisional = Note {
            id: temp_id,
            project_id,
            author: None,
            text: req.text.clone(),
            created_at: Utc::now(),
            pending: true,
        };

        let steps = self
            .patch("note.created", Some(temp_id), move |state| {
                let project = state
                    .project_mut(project_id)
                    .ok_or(CoreError::not_found("project", project_id))?;
                project.notes.push(provisional);
                Ok(vec![RollbackStep::RemoveNote {
                    project_id,
                    note_id: temp_id,
                }])
            })
            .await?;

        match self.api.create_note(&req).await {
            Ok(note) => {
                let canonical = note.clone();
                self.patch("note.created.confirmed", Some(note.id), move |state| {
                    if let Some(slot) = state.note_mut(project_id, temp_id) {
                        *slot = canonical;
                    }
                    Ok(())
                })
                .await?;
                Ok(note)
            }
            Err(err) => {
                let err = StoreError::from(err);
                self.roll_back("note.created", Some(temp_id), steps, &err).await;
                Err(err)
            }
        }
    }

    /// Edit a note's text.
    pub async fn update_note(
        &self,
        project_id: EntityId,
        note_id: EntityId,
        text: &str,
    ) -> Result<Note, StoreError> {
        validate_text(text)?;

        let steps = self
            .patch("note.updated", Some(note_id), |state| {
                let note = state
                    .note_mut(project_id, note_id)
                    .ok_or(CoreError::not_found("note", note_id))?;
                let steps = vec![RollbackStep::RestoreNoteText {
                    project_id,
                    note_id,
                    text: note.text.clone(),
                }];
                note.text = text.to_string();
                Ok(steps)
            })
            .await?;

        match self.api.update_note(note_id, text).await {
            Ok(note) => {
                let canonical = note.clone();
                self.patch("note.updated.confirmed", Some(note_id), move |state| {
                    if let Some(slot) = state.note_mut(project_id, note_id) {
                        *slot = canonical;
                    }
                    Ok(())
                })
                .await?;
                Ok(note)
            }
            Err(err) => {
                let err = StoreError::from(err);
                self.roll_back("note.updated", Some(note_id), steps, &err).await;
                Err(err)
            }
        }
    }

    /// Delete a note.
    pub async fn delete_note(
        &self,
        project_id: EntityId,
        note_id: EntityId,
    ) -> Result<(), StoreError> {
        let steps = self
            .patch("note.deleted", Some(note_id), |state| {
                let project = state
                    .project_mut(project_id)
                    .ok_or(CoreError::not_found("project", project_id))?;
                let index = project
                    .notes
                    .iter()
                    .position(|n| n.id == note_id)
                    .ok_or(CoreError::not_found("note", note_id))?;
                let note = project.notes.remove(index);
                Ok(vec![RollbackStep::InsertNote {
                    project_id,
                    index,
                    note,
                }])
            })
            .await?;

        if let Err(err) = self.api.delete_note(note_id).await {
            let err = StoreError::from(err);
            self.roll_back("note.deleted", Some(note_id), steps, &err).await;
            return Err(err);
        }
        Ok(())
    }

    /// Demote a project note to a comment on a task. The target task
    /// may live in any loaded project.
    pub async fn move_note_to_task(
        &self,
        project_id: EntityId,
        note_id: EntityId,
        target_task_id: EntityId,
    ) -> Result<Comment, StoreError> {
        let result = self.api.move_note_to_task(note_id, target_task_id).await?;
        let comment = result.comment.clone();

        self.patch("note.moved", Some(note_id), move |state| {
            if let Some(project) = state.project_mut(project_id) {
                project.notes.retain(|n| n.id != result.deleted_note_id);
            }
            if let Some(owner) = state.project_of_task(target_task_id) {
                if let Some(task) = state.task_mut(owner, target_task_id) {
                    task.comments.push(result.comment);
                }
            }
            Ok(())
        })
        .await?;
        Ok(comment)
    }
}
