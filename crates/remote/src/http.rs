//! [`reqwest`]-backed implementation of [`TrackerApi`].

use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;

use flowdeck_core::note::{
    Comment, CommentToNoteMove, CreateComment, CreateNote, Note, NoteToCommentMove,
};
use flowdeck_core::project::{CreateProject, Project, UpdateProject};
use flowdeck_core::task::{CreateTask, Task, UpdateTask};
use flowdeck_core::types::EntityId;

use crate::api::{TrackerApi, UserSummary};
use crate::backup::{BackupDocument, RestoreSummary};
use crate::config::RemoteConfig;
use crate::error::RemoteError;

/// HTTP client for the tracker backend.
///
/// Holds a pooled [`reqwest::Client`] plus the base URL and optional
/// bearer token from [`RemoteConfig`]. Cheap to share behind an `Arc`.
pub struct HttpTrackerApi {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

/// Error body the server sends for every failure.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl HttpTrackerApi {
    /// Build a client from configuration.
    pub fn new(config: &RemoteConfig) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        })
    }

    /// Start a request to `{base_url}{path}`, attaching the bearer token
    /// when one is configured.
    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut req = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        req
    }

    // ---- private helpers ----

    /// Ensure the response has a success status. On failure, extract the
    /// server's `{"error": ...}` message (falling back to the raw body,
    /// then `HTTP {status}`) and map 401 to the distinguished
    /// [`RemoteError::Unauthorized`].
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        let message = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(parsed) => parsed.error,
            Err(_) => body,
        };
        let message = if message.trim().is_empty() {
            format!("HTTP {}", status.as_u16())
        } else {
            message
        };

        tracing::warn!(status = status.as_u16(), %message, "tracker API call failed");

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(RemoteError::Unauthorized(message));
        }
        Err(RemoteError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, RemoteError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Assert success, discarding the `{"ok": true}` ack body.
    async fn check_status(response: reqwest::Response) -> Result<(), RemoteError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl TrackerApi for HttpTrackerApi {
    // ---- projects ----

    async fn list_projects(&self) -> Result<Vec<Project>, RemoteError> {
        let response = self.request(Method::GET, "/projects").send().await?;
        Self::parse_response(response).await
    }

    async fn list_archived_projects(&self) -> Result<Vec<Project>, RemoteError> {
        let response = self
            .request(Method::GET, "/projects/archived")
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn create_project(&self, req: &CreateProject) -> Result<Project, RemoteError> {
        let response = self
            .request(Method::POST, "/projects")
            .json(req)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn update_project(
        &self,
        id: EntityId,
        req: &UpdateProject,
    ) -> Result<Project, RemoteError> {
        let response = self
            .request(Method::PUT, &format!("/projects/{id}"))
            .json(req)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn archive_project(&self, id: EntityId) -> Result<(), RemoteError> {
        let response = self
            .request(Method::PATCH, &format!("/projects/{id}/archive"))
            .send()
            .await?;
        Self::check_status(response).await
    }

    async fn unarchive_project(&self, id: EntityId) -> Result<Project, RemoteError> {
        let response = self
            .request(Method::PATCH, &format!("/projects/{id}/unarchive"))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn delete_project(&self, id: EntityId) -> Result<(), RemoteError> {
        let response = self
            .request(Method::DELETE, &format!("/projects/{id}"))
            .send()
            .await?;
        Self::check_status(response).await
    }

    // ---- membership ----

    async fn add_member(
        &self,
        project_id: EntityId,
        user_id: EntityId,
    ) -> Result<Project, RemoteError> {
        let body = serde_json::json!({ "user_id": user_id });
        let response = self
            .request(Method::POST, &format!("/projects/{project_id}/members"))
            .json(&body)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn remove_member(
        &self,
        project_id: EntityId,
        user_id: EntityId,
    ) -> Result<Project, RemoteError> {
        let response = self
            .request(
                Method::DELETE,
                &format!("/projects/{project_id}/members/{user_id}"),
            )
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn search_users(&self, query: &str) -> Result<Vec<UserSummary>, RemoteError> {
        let response = self
            .request(Method::GET, "/users/search")
            .query(&[("q", query)])
            .send()
            .await?;
        Self::parse_response(response).await
    }

    // ---- tasks ----

    async fn create_task(&self, req: &CreateTask) -> Result<Task, RemoteError> {
        let response = self.request(Method::POST, "/tasks").json(req).send().await?;
        Self::parse_response(response).await
    }

    async fn update_task(&self, id: EntityId, req: &UpdateTask) -> Result<Task, RemoteError> {
        let response = self
            .request(Method::PUT, &format!("/tasks/{id}"))
            .json(req)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn toggle_task(&self, id: EntityId) -> Result<Task, RemoteError> {
        let response = self
            .request(Method::PATCH, &format!("/tasks/{id}/toggle"))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn delete_task(&self, id: EntityId) -> Result<(), RemoteError> {
        let response = self
            .request(Method::DELETE, &format!("/tasks/{id}"))
            .send()
            .await?;
        Self::check_status(response).await
    }

    // ---- comments ----

    async fn create_comment(&self, req: &CreateComment) -> Result<Comment, RemoteError> {
        let response = self
            .request(Method::POST, "/comments")
            .json(req)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn update_comment(&self, id: EntityId, text: &str) -> Result<Comment, RemoteError> {
        let body = serde_json::json!({ "text": text });
        let response = self
            .request(Method::PUT, &format!("/comments/{id}"))
            .json(&body)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn delete_comment(&self, id: EntityId) -> Result<(), RemoteError> {
        let response = self
            .request(Method::DELETE, &format!("/comments/{id}"))
            .send()
            .await?;
        Self::check_status(response).await
    }

    async fn move_comment_to_project(
        &self,
        comment_id: EntityId,
        project_id: EntityId,
    ) -> Result<CommentToNoteMove, RemoteError> {
        let body = serde_json::json!({ "project_id": project_id });
        let response = self
            .request(
                Method::POST,
                &format!("/comments/{comment_id}/move-to-project"),
            )
            .json(&body)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    // ---- project notes ----

    async fn create_note(&self, req: &CreateNote) -> Result<Note, RemoteError> {
        let response = self
            .request(Method::POST, "/project-notes")
            .json(req)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn update_note(&self, id: EntityId, text: &str) -> Result<Note, RemoteError> {
        let body = serde_json::json!({ "text": text });
        let response = self
            .request(Method::PUT, &format!("/project-notes/{id}"))
            .json(&body)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn delete_note(&self, id: EntityId) -> Result<(), RemoteError> {
        let response = self
            .request(Method::DELETE, &format!("/project-notes/{id}"))
            .send()
            .await?;
        Self::check_status(response).await
    }

    async fn move_note_to_task(
        &self,
        note_id: EntityId,
        task_id: EntityId,
    ) -> Result<NoteToCommentMove, RemoteError> {
        let body = serde_json::json!({ "task_id": task_id });
        let response = self
            .request(
                Method::POST,
                &format!("/project-notes/{note_id}/move-to-task"),
            )
            .json(&body)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    // ---- backup / restore ----

    async fn backup(&self) -> Result<BackupDocument, RemoteError> {
        let response = self.request(Method::GET, "/backup").send().await?;
        Self::parse_response(response).await
    }

    async fn restore(&self, doc: &BackupDocument) -> Result<RestoreSummary, RemoteError> {
        let response = self
            .request(Method::POST, "/restore")
            .json(doc)
            .send()
            .await?;
        Self::parse_response(response).await
    }
}
