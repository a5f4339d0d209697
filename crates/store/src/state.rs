//! The locked interior of the store.

use flowdeck_core::note::{Comment, Note};
use flowdeck_core::project::Project;
use flowdeck_core::task::Task;
use flowdeck_core::types::EntityId;

/// Everything guarded by the store's write lock.
///
/// Mutation happens only inside `ProjectStore::patch` closures, so the
/// tree is never observable mid-patch.
#[derive(Debug)]
pub(crate) struct StoreState {
    /// Non-archived projects in server load order.
    pub projects: Vec<Project>,
    /// Archived projects, populated by `load_archived`.
    pub archived: Vec<Project>,
    /// Sticky flag recording the last failed full load.
    pub load_error: Option<String>,
    /// Whether a full load has succeeded at least once.
    pub loaded: bool,
    /// Bumped on every committed patch; keys the view cache.
    pub revision: u64,
}

impl StoreState {
    pub fn new() -> Self {
        Self {
            projects: Vec::new(),
            archived: Vec::new(),
            load_error: None,
            loaded: false,
            revision: 0,
        }
    }

    // ---- lookups ----

    pub fn project_index(&self, id: EntityId) -> Option<usize> {
        self.projects.iter().position(|p| p.id == id)
    }

    pub fn archived_index(&self, id: EntityId) -> Option<usize> {
        self.archived.iter().position(|p| p.id == id)
    }

    pub fn project_mut(&mut self, id: EntityId) -> Option<&mut Project> {
        self.projects.iter_mut().find(|p| p.id == id)
    }

    pub fn task_mut(&mut self, project_id: EntityId, task_id: EntityId) -> Option<&mut Task> {
        self.project_mut(project_id)?
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
    }

    /// Id of the project whose task list contains `task_id`.
    pub fn project_of_task(&self, task_id: EntityId) -> Option<EntityId> {
        self.projects
            .iter()
            .find(|p| p.tasks.iter().any(|t| t.id == task_id))
            .map(|p| p.id)
    }

    pub fn comment_mut(
        &mut self,
        project_id: EntityId,
        task_id: EntityId,
        comment_id: EntityId,
    ) -> Option<&mut Comment> {
        self.task_mut(project_id, task_id)?
            .comments
            .iter_mut()
            .find(|c| c.id == comment_id)
    }

    pub fn note_mut(&mut self, project_id: EntityId, note_id: EntityId) -> Option<&mut Note> {
        self.project_mut(project_id)?
            .notes
            .iter_mut()
            .find(|n| n.id == note_id)
    }
}
