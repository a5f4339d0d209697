//! The backend operation contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use flowdeck_core::note::{
    Comment, CommentToNoteMove, CreateComment, CreateNote, Note, NoteToCommentMove,
};
use flowdeck_core::project::{CreateProject, Project, UpdateProject};
use flowdeck_core::task::{CreateTask, Task, UpdateTask};
use flowdeck_core::types::EntityId;

use crate::backup::{BackupDocument, RestoreSummary};
use crate::error::RemoteError;

/// A user as returned by the member-picker search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: EntityId,
    pub name: String,
    pub email: String,
}

/// One async method per backend operation.
///
/// The store holds this as `Arc<dyn TrackerApi>`; production code wires
/// in [`crate::HttpTrackerApi`] and tests substitute scripted fakes.
/// Every method either returns the canonical server payload or a
/// [`RemoteError`] with a user-presentable message.
#[async_trait]
pub trait TrackerApi: Send + Sync {
    // ---- projects ----

    /// Full non-archived project tree for the signed-in user.
    async fn list_projects(&self) -> Result<Vec<Project>, RemoteError>;

    /// Archived projects (shallow or full, server's choice).
    async fn list_archived_projects(&self) -> Result<Vec<Project>, RemoteError>;

    async fn create_project(&self, req: &CreateProject) -> Result<Project, RemoteError>;

    async fn update_project(
        &self,
        id: EntityId,
        req: &UpdateProject,
    ) -> Result<Project, RemoteError>;

    async fn archive_project(&self, id: EntityId) -> Result<(), RemoteError>;

    /// Returns the full canonical project, ready to rejoin the active
    /// list.
    async fn unarchive_project(&self, id: EntityId) -> Result<Project, RemoteError>;

    async fn delete_project(&self, id: EntityId) -> Result<(), RemoteError>;

    // ---- membership ----

    /// Owner-only. Returns the full canonical project.
    async fn add_member(
        &self,
        project_id: EntityId,
        user_id: EntityId,
    ) -> Result<Project, RemoteError>;

    /// Owner-only. Returns the full canonical project.
    async fn remove_member(
        &self,
        project_id: EntityId,
        user_id: EntityId,
    ) -> Result<Project, RemoteError>;

    /// Name/email lookup for the member picker.
    async fn search_users(&self, query: &str) -> Result<Vec<UserSummary>, RemoteError>;

    // ---- tasks ----

    /// Returns the canonical task with an empty comment list.
    async fn create_task(&self, req: &CreateTask) -> Result<Task, RemoteError>;

    /// Returns the canonical task including its comments.
    async fn update_task(&self, id: EntityId, req: &UpdateTask) -> Result<Task, RemoteError>;

    /// Flip the done flag server-side; the server assigns `done_at`.
    /// Returns the canonical task including its comments.
    async fn toggle_task(&self, id: EntityId) -> Result<Task, RemoteError>;

    async fn delete_task(&self, id: EntityId) -> Result<(), RemoteError>;

    // ---- comments ----

    async fn create_comment(&self, req: &CreateComment) -> Result<Comment, RemoteError>;

    async fn update_comment(&self, id: EntityId, text: &str) -> Result<Comment, RemoteError>;

    async fn delete_comment(&self, id: EntityId) -> Result<(), RemoteError>;

    /// Transactionally convert a comment into a note on `project_id`.
    async fn move_comment_to_project(
        &self,
        comment_id: EntityId,
        project_id: EntityId,
    ) -> Result<CommentToNoteMove, RemoteError>;

    // ---- project notes ----

    async fn create_note(&self, req: &CreateNote) -> Result<Note, RemoteError>;

    async fn update_note(&self, id: EntityId, text: &str) -> Result<Note, RemoteError>;

    async fn delete_note(&self, id: EntityId) -> Result<(), RemoteError>;

    /// Transactionally convert a note into a comment on `task_id`.
    async fn move_note_to_task(
        &self,
        note_id: EntityId,
        task_id: EntityId,
    ) -> Result<NoteToCommentMove, RemoteError>;

    // ---- backup / restore ----

    /// Export the signed-in user's owned data.
    async fn backup(&self) -> Result<BackupDocument, RemoteError>;

    /// Replace the signed-in user's owned data with `doc`. Callers must
    /// reload the full tree afterwards.
    async fn restore(&self, doc: &BackupDocument) -> Result<RestoreSummary, RemoteError>;
}
