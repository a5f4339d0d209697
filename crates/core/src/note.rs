//! Task comments and project notes.
//!
//! The two entry kinds are structurally twins (author, text, timestamp)
//! hanging off different parents, and each can be moved into the other
//! kind through a single server-side transaction. The move responses
//! pair the created destination entity with the id of the deleted
//! source; the server emits those two keys in camelCase.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{EntityId, Timestamp};

/// A comment on a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: EntityId,
    pub task_id: EntityId,
    /// Display name of the author; filled in by the server.
    #[serde(default)]
    pub author: Option<String>,
    pub text: String,
    pub created_at: Timestamp,
    /// Set while an optimistic insert awaits confirmation. Never
    /// serialized.
    #[serde(skip)]
    pub pending: bool,
}

/// A free-standing note on a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: EntityId,
    pub project_id: EntityId,
    #[serde(default)]
    pub author: Option<String>,
    pub text: String,
    pub created_at: Timestamp,
    /// Set while an optimistic insert awaits confirmation. Never
    /// serialized.
    #[serde(skip)]
    pub pending: bool,
}

/// Payload for creating a comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateComment {
    pub task_id: EntityId,
    pub text: String,
}

/// Payload for creating a project note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNote {
    pub project_id: EntityId,
    pub text: String,
}

/// Result of moving a comment into a project's notes: the created note
/// plus the id of the comment the server deleted in the same
/// transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentToNoteMove {
    pub note: Note,
    #[serde(rename = "deletedCommentId")]
    pub deleted_comment_id: EntityId,
}

/// Result of moving a note into a task's comments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteToCommentMove {
    pub comment: Comment,
    #[serde(rename = "deletedNoteId")]
    pub deleted_note_id: EntityId,
}

/// Validate comment/note text: non-empty after trimming.
pub fn validate_text(text: &str) -> Result<(), CoreError> {
    if text.trim().is_empty() {
        Err(CoreError::Validation("Text is required".to_string()))
    } else {
        Ok(())
    }
}
