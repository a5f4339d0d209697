//! Export/import document shapes.
//!
//! A backup is a flat dump of the four entity tables owned by the
//! signed-in user, not the nested tree: the entity types double as row
//! types because their collection fields default to empty on
//! deserialization.

use serde::{Deserialize, Serialize};

use flowdeck_core::note::{Comment, Note};
use flowdeck_core::project::Project;
use flowdeck_core::task::Task;
use flowdeck_core::types::Timestamp;

/// Current backup document version.
pub const BACKUP_VERSION: u32 = 1;

/// The export payload returned by `GET /backup` and accepted by
/// `POST /restore`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupDocument {
    pub version: u32,
    pub exported_at: Timestamp,
    pub data: BackupData,
}

/// Flat per-table rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupData {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub task_comments: Vec<Comment>,
    #[serde(default)]
    pub project_notes: Vec<Note>,
}

/// Row counts reported after a restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestoreCounts {
    pub projects: u64,
    pub tasks: u64,
    pub task_comments: u64,
    pub project_notes: u64,
}

/// Response of `POST /restore`. The store reloads the full tree after
/// receiving this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestoreSummary {
    pub ok: bool,
    pub restored: RestoreCounts,
}
