//! Task operations.

use chrono::Utc;

use flowdeck_core::dates;
use flowdeck_core::task::{validate_task_title, CreateTask, Task, UpdateTask};
use flowdeck_core::types::EntityId;
use flowdeck_core::CoreError;

use crate::error::StoreError;
use crate::rollback::RollbackStep;

use super::ProjectStore;

impl ProjectStore {
    /// Create a task inside a project.
    pub async fn create_task(&self, req: CreateTask) -> Result<Task, StoreError> {
        validate_task_title(&req.title)?;

        let project_id = req.project_id;
        let temp_id = self.temp_ids.allocate();
        let provisional = Task {
            id: temp_id,
            project_id,
            title: req.title.clone(),
            responsible: req.responsible.clone(),
            due_date: req.due_date,
            done: false,
            done_at: None,
            created_at: Utc::now(),
            comments: Vec::new(),
            pending: true,
        };

        let steps = self
            .patch("task.created", Some(temp_id), move |state| {
                let project = state
                    .project_mut(project_id)
                    .ok_or(CoreError::not_found("project", project_id))?;
                project.tasks.push(provisional);
                Ok(vec![RollbackStep::RemoveTask {
                    project_id,
                    task_id: temp_id,
                }])
            })
            .await?;

        match self.api.create_task(&req).await {
            Ok(task) => {
                let canonical = task.clone();
                self.patch("task.created.confirmed", Some(task.id), move |state| {
                    if let Some(slot) = state.task_mut(project_id, temp_id) {
                        *slot = canonical;
                    }
                    Ok(())
                })
                .await?;
                Ok(task)
            }
            Err(err) => {
                let err = StoreError::from(err);
                self.roll_back("task.created", Some(temp_id), steps, &err).await;
                Err(err)
            }
        }
    }

    /// Edit a task's title, responsible and due date.
    pub async fn update_task(
        &self,
        project_id: EntityId,
        task_id: EntityId,
        req: UpdateTask,
    ) -> Result<Task, StoreError> {
        validate_task_title(&req.title)?;

        let steps = self
            .patch("task.updated", Some(task_id), |state| {
                let task = state
                    .task_mut(project_id, task_id)
                    .ok_or(CoreError::not_found("task", task_id))?;
                let steps = vec![RollbackStep::RestoreTaskFields {
                    project_id,
                    task_id,
                    title: task.title.clone(),
                    responsible: task.responsible.clone(),
                    due_date: task.due_date,
                }];
                task.title = req.title.clone();
                task.responsible = req.responsible.clone();
                task.due_date = req.due_date;
                Ok(steps)
            })
            .await?;

        match self.api.update_task(task_id, &req).await {
            Ok(task) => {
                let canonical = task.clone();
                self.patch("task.updated.confirmed", Some(task_id), move |state| {
                    if let Some(slot) = state.task_mut(project_id, task_id) {
                        *slot = canonical;
                    }
                    Ok(())
                })
                .await?;
                Ok(task)
            }
            Err(err) => {
                let err = StoreError::from(err);
                self.roll_back("task.updated", Some(task_id), steps, &err).await;
                Err(err)
            }
        }
    }

    /// Flip a task's done state.
    ///
    /// Completion stamps today's local date into `done_at`; reopening
    /// clears it. Rolling back restores the exact prior `done_at`, not
    /// a recomputed one.
    pub async fn toggle_task(
        &self,
        project_id: EntityId,
        task_id: EntityId,
    ) -> Result<Task, StoreError> {
        let today = dates::today_local();
        let steps = self
            .patch("task.toggled", Some(task_id), |state| {
                let task = state
                    .task_mut(project_id, task_id)
                    .ok_or(CoreError::not_found("task", task_id))?;
                let steps = vec![RollbackStep::RestoreTaskDone {
                    project_id,
                    task_id,
                    done: task.done,
                    done_at: task.done_at,
                }];
                task.done = !task.done;
                task.done_at = if task.done { Some(today) } else { None };
                Ok(steps)
            })
            .await?;

        match self.api.toggle_task(task_id).await {
            Ok(task) => {
                let canonical = task.clone();
                self.patch("task.toggled.confirmed", Some(task_id), move |state| {
                    if let Some(slot) = state.task_mut(project_id, task_id) {
                        *slot = canonical;
                    }
                    Ok(())
                })
                .await?;
                Ok(task)
            }
            Err(err) => {
                let err = StoreError::from(err);
                self.roll_back("task.toggled", Some(task_id), steps, &err).await;
                Err(err)
            }
        }
    }

    /// Delete a task and its comments.
    pub async fn delete_task(
        &self,
        project_id: EntityId,
        task_id: EntityId,
    ) -> Result<(), StoreError> {
        let steps = self
            .patch("task.deleted", Some(task_id), |state| {
                let project = state
                    .project_mut(project_id)
                    .ok_or(CoreError::not_found("project", project_id))?;
                let index = project
                    .tasks
                    .iter()
                    .position(|t| t.id == task_id)
                    .ok_or(CoreError::not_found("task", task_id))?;
                let task = project.tasks.remove(index);
                Ok(vec![RollbackStep::InsertTask {
                    project_id,
                    index,
                    task,
                }])
            })
            .await?;

        if let Err(err) = self.api.delete_task(task_id).await {
            let err = StoreError::from(err);
            self.roll_back("task.deleted", Some(task_id), steps, &err).await;
            return Err(err);
        }
        Ok(())
    }
}
