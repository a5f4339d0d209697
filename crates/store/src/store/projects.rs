//! Project and membership operations.

use chrono::Utc;

use flowdeck_core::project::{
    validate_color, validate_project_name, CreateProject, Project, UpdateProject,
};
use flowdeck_core::types::EntityId;
use flowdeck_core::CoreError;

use crate::error::StoreError;
use crate::rollback::RollbackStep;

use super::ProjectStore;

impl ProjectStore {
    /// Create a project.
    ///
    /// A provisional project (negative id, `pending`) appears at the
    /// end of the active list immediately; the canonical row replaces
    /// it when the backend confirms.
    pub async fn create_project(&self, req: CreateProject) -> Result<Project, StoreError> {
        validate_project_name(&req.name)?;
        validate_color(&req.color)?;

        let temp_id = self.temp_ids.allocate();
        let provisional = Project {
            id: temp_id,
            name: req.name.clone(),
            color: req.color.clone(),
            archived: false,
            owner_id: None,
            created_at: Utc::now(),
            members: Vec::new(),
            tasks: Vec::new(),
            notes: Vec::new(),
            pending: true,
        };

        let steps = self
            .patch("project.created", Some(temp_id), move |state| {
                state.projects.push(provisional);
                Ok(vec![RollbackStep::RemoveActiveProject { id: temp_id }])
            })
            .await?;

        match self.api.create_project(&req).await {
            Ok(project) => {
                let canonical = project.clone();
                self.patch("project.created.confirmed", Some(project.id), move |state| {
                    if let Some(slot) = state.project_mut(temp_id) {
                        *slot = canonical;
                    }
                    Ok(())
                })
                .await?;
                Ok(project)
            }
            Err(err) => {
                let err = StoreError::from(err);
                self.roll_back("project.created", Some(temp_id), steps, &err)
                    .await;
                Err(err)
            }
        }
    }

    /// Rename/recolor a project.
    ///
    /// Only `name` and `color` are merged back from the canonical
    /// response; nested tasks and notes keep their local state.
    pub async fn update_project(
        &self,
        id: EntityId,
        req: UpdateProject,
    ) -> Result<Project, StoreError> {
        validate_project_name(&req.name)?;
        validate_color(&req.color)?;

        let steps = self
            .patch("project.updated", Some(id), |state| {
                let project = state
                    .project_mut(id)
                    .ok_or(CoreError::not_found("project", id))?;
                let steps = vec![RollbackStep::RestoreProjectMeta {
                    id,
                    name: project.name.clone(),
                    color: project.color.clone(),
                }];
                project.name = req.name.clone();
                project.color = req.color.clone();
                Ok(steps)
            })
            .await?;

        match self.api.update_project(id, &req).await {
            Ok(project) => {
                let name = project.name.clone();
                let color = project.color.clone();
                self.patch("project.updated.confirmed", Some(id), move |state| {
                    if let Some(p) = state.project_mut(id) {
                        p.name = name;
                        p.color = color;
                    }
                    Ok(())
                })
                .await?;
                Ok(project)
            }
            Err(err) => {
                let err = StoreError::from(err);
                self.roll_back("project.updated", Some(id), steps, &err).await;
                Err(err)
            }
        }
    }

    /// Archive a project: it leaves the active list immediately. The
    /// archived list is refreshed by `load_archived`, not patched here.
    pub async fn archive_project(&self, id: EntityId) -> Result<(), StoreError> {
        let steps = self
            .patch("project.archived", Some(id), |state| {
                let index = state
                    .project_index(id)
                    .ok_or(CoreError::not_found("project", id))?;
                let project = state.projects.remove(index);
                Ok(vec![RollbackStep::InsertActiveProject { index, project }])
            })
            .await?;

        if let Err(err) = self.api.archive_project(id).await {
            let err = StoreError::from(err);
            self.roll_back("project.archived", Some(id), steps, &err).await;
            return Err(err);
        }
        Ok(())
    }

    /// Move a project from the archived list back onto the board.
    pub async fn unarchive_project(&self, id: EntityId) -> Result<Project, StoreError> {
        let steps = self
            .patch("project.unarchived", Some(id), |state| {
                let index = state
                    .archived_index(id)
                    .ok_or(CoreError::not_found("project", id))?;
                let original = state.archived.remove(index);
                let mut restored = original.clone();
                restored.archived = false;
                state.projects.push(restored);
                Ok(vec![
                    RollbackStep::InsertArchivedProject {
                        index,
                        project: original,
                    },
                    RollbackStep::RemoveActiveProject { id },
                ])
            })
            .await?;

        match self.api.unarchive_project(id).await {
            Ok(project) => {
                let canonical = project.clone();
                self.patch("project.unarchived.confirmed", Some(id), move |state| {
                    if let Some(slot) = state.project_mut(id) {
                        *slot = canonical;
                    }
                    Ok(())
                })
                .await?;
                Ok(project)
            }
            Err(err) => {
                let err = StoreError::from(err);
                self.roll_back("project.unarchived", Some(id), steps, &err)
                    .await;
                Err(err)
            }
        }
    }

    /// Delete a project from whichever lists hold it (a project can sit
    /// on the board and in the archived list view at once).
    pub async fn delete_project(&self, id: EntityId) -> Result<(), StoreError> {
        let steps = self
            .patch("project.deleted", Some(id), |state| {
                let mut steps = Vec::new();
                if let Some(index) = state.project_index(id) {
                    let project = state.projects.remove(index);
                    steps.push(RollbackStep::InsertActiveProject { index, project });
                }
                if let Some(index) = state.archived_index(id) {
                    let project = state.archived.remove(index);
                    steps.push(RollbackStep::InsertArchivedProject { index, project });
                }
                if steps.is_empty() {
                    return Err(CoreError::not_found("project", id).into());
                }
                Ok(steps)
            })
            .await?;

        if let Err(err) = self.api.delete_project(id).await {
            let err = StoreError::from(err);
            self.roll_back("project.deleted", Some(id), steps, &err).await;
            return Err(err);
        }
        Ok(())
    }

    /// Add a user to a project. Owner-only; server-authoritative (the
    /// member's name and email only exist server-side), so the local
    /// tree changes only when the canonical project arrives.
    pub async fn add_member(
        &self,
        project_id: EntityId,
        user_id: EntityId,
    ) -> Result<Project, StoreError> {
        let project = self.api.add_member(project_id, user_id).await?;
        let canonical = project.clone();
        self.patch("project.member_added", Some(project_id), move |state| {
            if let Some(slot) = state.project_mut(project_id) {
                *slot = canonical;
            }
            Ok(())
        })
        .await?;
        Ok(project)
    }

    /// Remove a member. Owner-only; server-authoritative, mirroring
    /// [`add_member`](Self::add_member).
    pub async fn remove_member(
        &self,
        project_id: EntityId,
        user_id: EntityId,
    ) -> Result<Project, StoreError> {
        let project = self.api.remove_member(project_id, user_id).await?;
        let canonical = project.clone();
        self.patch("project.member_removed", Some(project_id), move |state| {
            if let Some(slot) = state.project_mut(project_id) {
                *slot = canonical;
            }
            Ok(())
        })
        .await?;
        Ok(project)
    }
}
