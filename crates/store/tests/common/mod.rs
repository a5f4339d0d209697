//! Shared test harness: a scripted in-memory [`TrackerApi`] and JSON
//! row builders.
//!
//! Each test queues the responses it expects the store to request, in
//! order, per trait method. An unscripted call panics, so tests also
//! pin down *which* backend calls an operation makes.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use flowdeck_core::note::{
    Comment, CommentToNoteMove, CreateComment, CreateNote, Note, NoteToCommentMove,
};
use flowdeck_core::project::{CreateProject, Project, UpdateProject};
use flowdeck_core::task::{CreateTask, Task, UpdateTask};
use flowdeck_core::types::EntityId;
use flowdeck_remote::api::UserSummary;
use flowdeck_remote::{BackupDocument, RemoteError, RestoreSummary, TrackerApi};
use flowdeck_store::ProjectStore;

enum Scripted {
    Ok(Value),
    Err(RemoteError),
}

/// A [`TrackerApi`] that replays queued responses and records calls.
#[derive(Default)]
pub struct ScriptedApi {
    script: Mutex<HashMap<&'static str, VecDeque<Scripted>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a successful JSON response for `method`.
    pub fn ok(&self, method: &'static str, body: Value) {
        self.script
            .lock()
            .unwrap()
            .entry(method)
            .or_default()
            .push_back(Scripted::Ok(body));
    }

    /// Queue a failure for `method`.
    pub fn err(&self, method: &'static str, error: RemoteError) {
        self.script
            .lock()
            .unwrap()
            .entry(method)
            .or_default()
            .push_back(Scripted::Err(error));
    }

    /// Backend method names in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn take<T: serde::de::DeserializeOwned>(&self, method: &'static str) -> Result<T, RemoteError> {
        self.calls.lock().unwrap().push(method.to_string());
        let scripted = self
            .script
            .lock()
            .unwrap()
            .get_mut(method)
            .and_then(|queue| queue.pop_front())
            .unwrap_or_else(|| panic!("no scripted response left for `{method}`"));
        match scripted {
            Scripted::Ok(body) => Ok(serde_json::from_value(body)
                .unwrap_or_else(|e| panic!("scripted `{method}` body does not deserialize: {e}"))),
            Scripted::Err(err) => Err(err),
        }
    }
}

#[async_trait]
impl TrackerApi for ScriptedApi {
    async fn list_projects(&self) -> Result<Vec<Project>, RemoteError> {
        self.take("list_projects")
    }

    async fn list_archived_projects(&self) -> Result<Vec<Project>, RemoteError> {
        self.take("list_archived_projects")
    }

    async fn create_project(&self, _req: &CreateProject) -> Result<Project, RemoteError> {
        self.take("create_project")
    }

    async fn update_project(
        &self,
        _id: EntityId,
        _req: &UpdateProject,
    ) -> Result<Project, RemoteError> {
        self.take("update_project")
    }

    async fn archive_project(&self, _id: EntityId) -> Result<(), RemoteError> {
        self.take("archive_project")
    }

    async fn unarchive_project(&self, _id: EntityId) -> Result<Project, RemoteError> {
        self.take("unarchive_project")
    }

    async fn delete_project(&self, _id: EntityId) -> Result<(), RemoteError> {
        self.take("delete_project")
    }

    async fn add_member(
        &self,
        _project_id: EntityId,
        _user_id: EntityId,
    ) -> Result<Project, RemoteError> {
        self.take("add_member")
    }

    async fn remove_member(
        &self,
        _project_id: EntityId,
        _user_id: EntityId,
    ) -> Result<Project, RemoteError> {
        self.take("remove_member")
    }

    async fn search_users(&self, _query: &str) -> Result<Vec<UserSummary>, RemoteError> {
        self.take("search_users")
    }

    async fn create_task(&self, _req: &CreateTask) -> Result<Task, RemoteError> {
        self.take("create_task")
    }

    async fn update_task(&self, _id: EntityId, _req: &UpdateTask) -> Result<Task, RemoteError> {
        self.take("update_task")
    }

    async fn toggle_task(&self, _id: EntityId) -> Result<Task, RemoteError> {
        self.take("toggle_task")
    }

    async fn delete_task(&self, _id: EntityId) -> Result<(), RemoteError> {
        self.take("delete_task")
    }

    async fn create_comment(&self, _req: &CreateComment) -> Result<Comment, RemoteError> {
        self.take("create_comment")
    }

    async fn update_comment(&self, _id: EntityId, _text: &str) -> Result<Comment, RemoteError> {
        self.take("update_comment")
    }

    async fn delete_comment(&self, _id: EntityId) -> Result<(), RemoteError> {
        self.take("delete_comment")
    }

    async fn move_comment_to_project(
        &self,
        _comment_id: EntityId,
        _project_id: EntityId,
    ) -> Result<CommentToNoteMove, RemoteError> {
        self.take("move_comment_to_project")
    }

    async fn create_note(&self, _req: &CreateNote) -> Result<Note, RemoteError> {
        self.take("create_note")
    }

    async fn update_note(&self, _id: EntityId, _text: &str) -> Result<Note, RemoteError> {
        self.take("update_note")
    }

    async fn delete_note(&self, _id: EntityId) -> Result<(), RemoteError> {
        self.take("delete_note")
    }

    async fn move_note_to_task(
        &self,
        _note_id: EntityId,
        _task_id: EntityId,
    ) -> Result<NoteToCommentMove, RemoteError> {
        self.take("move_note_to_task")
    }

    async fn backup(&self) -> Result<BackupDocument, RemoteError> {
        self.take("backup")
    }

    async fn restore(&self, _doc: &BackupDocument) -> Result<RestoreSummary, RemoteError> {
        self.take("restore")
    }
}

// ---------------------------------------------------------------------------
// Error helpers
// ---------------------------------------------------------------------------

/// A generic 500 rejection.
pub fn server_error(message: &str) -> RemoteError {
    RemoteError::Api {
        status: 500,
        message: message.to_string(),
    }
}

/// A rejected session.
pub fn unauthorized() -> RemoteError {
    RemoteError::Unauthorized("Invalid or expired session".to_string())
}

// ---------------------------------------------------------------------------
// JSON row builders
// ---------------------------------------------------------------------------

/// A project row with no members, tasks or notes.
pub fn project_json(id: EntityId, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "color": "#6366f1",
        "archived": false,
        "owner_id": 1,
        "created_at": "2026-03-01T12:00:00Z",
        "members": [],
        "tasks": [],
        "notes": [],
    })
}

/// An open task row with no due date and no comments.
pub fn task_json(id: EntityId, project_id: EntityId, title: &str) -> Value {
    json!({
        "id": id,
        "project_id": project_id,
        "title": title,
        "responsible": null,
        "due_date": null,
        "done": false,
        "done_at": null,
        "created_at": "2026-03-01T12:00:00Z",
        "comments": [],
    })
}

pub fn comment_json(id: EntityId, task_id: EntityId, text: &str) -> Value {
    json!({
        "id": id,
        "task_id": task_id,
        "author": "dana",
        "text": text,
        "created_at": "2026-03-01T12:00:00Z",
    })
}

pub fn note_json(id: EntityId, project_id: EntityId, text: &str) -> Value {
    json!({
        "id": id,
        "project_id": project_id,
        "author": "dana",
        "text": text,
        "created_at": "2026-03-01T12:00:00Z",
    })
}

// ---------------------------------------------------------------------------
// Store builders
// ---------------------------------------------------------------------------

/// A store backed by `api`, loaded with the given project rows.
/// Provisional ids count down from -1.
pub async fn loaded_store(api: Arc<ScriptedApi>, projects: Value) -> Arc<ProjectStore> {
    api.ok("list_projects", projects);
    let store = ProjectStore::with_temp_seed(api, -1);
    store.load().await.expect("initial load should succeed");
    store
}
