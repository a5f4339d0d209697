//! Project aggregate: the root entity of the cached tree.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::note::Note;
use crate::task::Task;
use crate::types::{EntityId, Timestamp};

/// Palette offered for new projects. The server falls back to the first
/// entry when a create request omits the color.
pub const PROJECT_COLORS: &[&str] = &[
    "#6366f1", "#8b5cf6", "#ec4899", "#14b8a6", "#f97316", "#06b6d4", "#f59e0b", "#22c55e",
];

/// Color assigned when a create request does not pick one.
pub const DEFAULT_PROJECT_COLOR: &str = "#6366f1";

/// Maximum project name length.
pub const MAX_PROJECT_NAME_LEN: usize = 200;

/// Membership role within a project. Every project has exactly one owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    Member,
}

/// A user's membership in a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// A project with its nested tasks, notes and member list.
///
/// This is the client-side shape: the server payload is identical except
/// for the `pending` marker, which exists only in the local cache and
/// flags entities inserted optimistically but not yet confirmed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: EntityId,
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub owner_id: Option<EntityId>,
    pub created_at: Timestamp,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub notes: Vec<Note>,
    /// Set while an optimistic insert awaits confirmation. Never
    /// serialized.
    #[serde(skip)]
    pub pending: bool,
}

impl Project {
    /// The member holding the `owner` role, if the member list is loaded.
    pub fn owner(&self) -> Option<&Member> {
        self.members.iter().find(|m| m.role == Role::Owner)
    }

    /// Returns `true` if any task in this project is past its due date.
    pub fn has_overdue_task(&self, today: chrono::NaiveDate) -> bool {
        use crate::task::TaskStatus;
        self.tasks
            .iter()
            .any(|t| TaskStatus::classify(t.due_date, t.done, today) == TaskStatus::Overdue)
    }

    /// Look up a task by id.
    pub fn task(&self, task_id: EntityId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    /// Look up a note by id.
    pub fn note(&self, note_id: EntityId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == note_id)
    }
}

/// Payload for creating a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub color: String,
}

/// Payload for renaming/recoloring a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProject {
    pub name: String,
    pub color: String,
}

/// Validate a project name: non-empty after trimming, bounded length.
pub fn validate_project_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Project name is required".to_string()));
    }
    if trimmed.len() > MAX_PROJECT_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Project name must be at most {MAX_PROJECT_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate a `#RRGGBB` hex color.
pub fn validate_color(color: &str) -> Result<(), CoreError> {
    let hex = color.strip_prefix('#').unwrap_or("");
    if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid color '{color}'. Expected #RRGGBB"
        )))
    }
}
