//! The aggregate store facade.
//!
//! [`ProjectStore`] owns the project tree and is the only writer.
//! Mutating operations follow the optimistic discipline described in
//! the crate docs; they live in per-domain modules (`projects`,
//! `tasks`, `notes`, `backup`) as `impl ProjectStore` blocks.

mod backup;
mod notes;
mod projects;
mod tasks;

use std::sync::Arc;

use tokio::sync::{broadcast, RwLock};

use flowdeck_core::board::{BoardStats, NoteRow, TaskRow};
use flowdeck_core::dates;
use flowdeck_core::filter::TaskFilter;
use flowdeck_core::project::Project;
use flowdeck_core::temp_id::TempIdAllocator;
use flowdeck_core::types::EntityId;
use flowdeck_remote::TrackerApi;

use crate::error::StoreError;
use crate::events::{ChangeBus, StoreEvent};
use crate::rollback::{self, RollbackStep};
use crate::state::StoreState;
use crate::views::ViewCache;

/// In-memory cache of the signed-in user's projects, tasks, comments
/// and notes, mutated optimistically against a [`TrackerApi`] backend.
///
/// Created once via [`ProjectStore::new`]; the returned `Arc` is cheap
/// to clone into UI tasks. Reads hand out clones or `Arc`-shared view
/// rows and never touch the network; all writes go through the
/// operation methods.
pub struct ProjectStore {
    /// The tree plus bookkeeping, behind the single write lock.
    state: RwLock<StoreState>,
    api: Arc<dyn TrackerApi>,
    temp_ids: TempIdAllocator,
    changes: ChangeBus,
    views: ViewCache,
}

impl ProjectStore {
    /// Create an empty store backed by `api`. Call
    /// [`load`](Self::load) to populate it.
    pub fn new(api: Arc<dyn TrackerApi>) -> Arc<Self> {
        Self::with_temp_seed(api, -1)
    }

    /// Create a store whose provisional ids start at `seed` (must be
    /// negative). Tests use this to make temp ids predictable.
    pub fn with_temp_seed(api: Arc<dyn TrackerApi>, seed: i64) -> Arc<Self> {
        Arc::new(Self {
            state: RwLock::new(StoreState::new()),
            api,
            temp_ids: TempIdAllocator::with_seed(seed),
            changes: ChangeBus::default(),
            views: ViewCache::default(),
        })
    }

    /// Subscribe to committed patches.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.changes.subscribe()
    }

    // ---- loading ----

    /// Fetch the full project tree.
    ///
    /// On failure the store empties and records the error (the board
    /// renders blank with a message rather than stale data); the error
    /// is also returned so callers can react, e.g. to a rejected
    /// session.
    pub async fn load(&self) -> Result<(), StoreError> {
        match self.api.list_projects().await {
            Ok(projects) => {
                self.patch("store.loaded", None, move |state| {
                    state.projects = projects;
                    state.loaded = true;
                    state.load_error = None;
                    Ok(())
                })
                .await
            }
            Err(err) => {
                let err = StoreError::from(err);
                tracing::warn!(error = %err, "project load failed; clearing store");
                self.patch("store.load_failed", None, |state| {
                    state.projects.clear();
                    state.loaded = false;
                    state.load_error = Some(err.to_string());
                    Ok(())
                })
                .await?;
                Err(err)
            }
        }
    }

    /// Fetch the archived project list. Failures propagate without
    /// touching the load-error flag; the active board is unaffected.
    pub async fn load_archived(&self) -> Result<(), StoreError> {
        let archived = self.api.list_archived_projects().await?;
        self.patch("store.archived_loaded", None, move |state| {
            state.archived = archived;
            Ok(())
        })
        .await
    }

    // ---- reads ----

    /// Snapshot of the non-archived projects, in load order.
    pub async fn projects(&self) -> Vec<Project> {
        self.state.read().await.projects.clone()
    }

    /// Snapshot of the archived projects.
    pub async fn archived(&self) -> Vec<Project> {
        self.state.read().await.archived.clone()
    }

    /// One project by id, from the active list.
    pub async fn project(&self, id: EntityId) -> Option<Project> {
        let state = self.state.read().await;
        state.projects.iter().find(|p| p.id == id).cloned()
    }

    /// The recorded load failure, if the last full load failed.
    pub async fn load_error(&self) -> Option<String> {
        self.state.read().await.load_error.clone()
    }

    /// Whether a full load has succeeded at least once.
    pub async fn is_loaded(&self) -> bool {
        self.state.read().await.loaded
    }

    /// Revision counter; bumps on every committed patch.
    pub async fn revision(&self) -> u64 {
        self.state.read().await.revision
    }

    // ---- derived views ----

    /// Every task across all projects, annotated with its project.
    pub async fn all_tasks(&self) -> Arc<Vec<TaskRow>> {
        let state = self.state.read().await;
        self.views.flat(state.revision, &state.projects).await
    }

    /// Projects in display order: overdue first, then reverse
    /// case-insensitive name.
    pub async fn sorted_projects(&self) -> Arc<Vec<Project>> {
        let state = self.state.read().await;
        self.views
            .ordered(state.revision, dates::today_local(), &state.projects)
            .await
    }

    /// Tasks passing `filter`, in project order.
    pub async fn filtered_tasks(&self, filter: &TaskFilter) -> Arc<Vec<TaskRow>> {
        let state = self.state.read().await;
        self.views
            .filtered(state.revision, dates::today_local(), filter, &state.projects)
            .await
    }

    /// Project notes matching the filter's search text.
    pub async fn note_matches(&self, filter: &TaskFilter) -> Arc<Vec<NoteRow>> {
        let state = self.state.read().await;
        self.views
            .notes(state.revision, filter, &state.projects)
            .await
    }

    /// Board counters.
    pub async fn stats(&self) -> BoardStats {
        let state = self.state.read().await;
        self.views
            .stats(state.revision, dates::today_local(), &state.projects)
            .await
    }

    // ---- patch plumbing ----

    /// Run a synchronous patch under the write lock, bump the revision
    /// and publish `event_type`.
    ///
    /// The closure must validate before mutating: when it returns an
    /// error the tree is untouched, nothing is published and the
    /// revision stays put.
    pub(crate) async fn patch<R>(
        &self,
        event_type: &str,
        entity_id: Option<EntityId>,
        f: impl FnOnce(&mut StoreState) -> Result<R, StoreError>,
    ) -> Result<R, StoreError> {
        let mut state = self.state.write().await;
        let out = f(&mut state)?;
        state.revision += 1;
        let revision = state.revision;
        drop(state);

        let mut event = StoreEvent::new(event_type, revision);
        if let Some(id) = entity_id {
            event = event.with_entity(id);
        }
        self.changes.publish(event);
        Ok(out)
    }

    /// Undo a failed optimistic patch and publish `{operation}.rollback`.
    pub(crate) async fn roll_back(
        &self,
        operation: &str,
        entity_id: Option<EntityId>,
        steps: Vec<RollbackStep>,
        error: &StoreError,
    ) {
        tracing::warn!(
            error = %error,
            operation,
            "backend rejected mutation; rolling back local patch"
        );
        let mut state = self.state.write().await;
        rollback::apply(&mut state, steps);
        state.revision += 1;
        let revision = state.revision;
        drop(state);

        let mut event = StoreEvent::new(format!("{operation}.rollback"), revision);
        if let Some(id) = entity_id {
            event = event.with_entity(id);
        }
        self.changes.publish(event);
    }
}
