//! Memoized derived views.
//!
//! The projections themselves live in `flowdeck_core::board` and are
//! pure; this cache keys their results on `(revision, today, filter)`
//! and hands out `Arc`-shared vectors, so repeated reads between
//! patches cost a lock and a pointer clone.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::Mutex;

use flowdeck_core::board::{self, BoardStats, NoteRow, TaskRow};
use flowdeck_core::filter::TaskFilter;
use flowdeck_core::project::Project;

#[derive(Default)]
struct CacheSlots {
    flat: Option<(u64, Arc<Vec<TaskRow>>)>,
    ordered: Option<(u64, NaiveDate, Arc<Vec<Project>>)>,
    filtered: Option<(u64, NaiveDate, TaskFilter, Arc<Vec<TaskRow>>)>,
    notes: Option<(u64, TaskFilter, Arc<Vec<NoteRow>>)>,
    stats: Option<(u64, NaiveDate, BoardStats)>,
}

/// Per-store cache of the derived views.
#[derive(Default)]
pub(crate) struct ViewCache {
    slots: Mutex<CacheSlots>,
}

impl ViewCache {
    /// Flattened task rows for `revision`.
    pub async fn flat(&self, revision: u64, projects: &[Project]) -> Arc<Vec<TaskRow>> {
        let mut slots = self.slots.lock().await;
        if let Some((rev, rows)) = &slots.flat {
            if *rev == revision {
                return rows.clone();
            }
        }
        let rows = Arc::new(board::flatten(projects));
        slots.flat = Some((revision, rows.clone()));
        rows
    }

    /// Display-ordered projects for `(revision, today)`.
    pub async fn ordered(
        &self,
        revision: u64,
        today: NaiveDate,
        projects: &[Project],
    ) -> Arc<Vec<Project>> {
        let mut slots = self.slots.lock().await;
        if let Some((rev, day, ordered)) = &slots.ordered {
            if *rev == revision && *day == today {
                return ordered.clone();
            }
        }
        let ordered = Arc::new(board::sort_projects(projects, today));
        slots.ordered = Some((revision, today, ordered.clone()));
        ordered
    }

    /// Filtered task rows for `(revision, today, filter)`.
    pub async fn filtered(
        &self,
        revision: u64,
        today: NaiveDate,
        filter: &TaskFilter,
        projects: &[Project],
    ) -> Arc<Vec<TaskRow>> {
        let flat = self.flat(revision, projects).await;
        let mut slots = self.slots.lock().await;
        if let Some((rev, day, cached_filter, rows)) = &slots.filtered {
            if *rev == revision && *day == today && cached_filter == filter {
                return rows.clone();
            }
        }
        let rows = Arc::new(board::filter_tasks(&flat, filter, today));
        slots.filtered = Some((revision, today, filter.clone(), rows.clone()));
        rows
    }

    /// Note-search rows for `(revision, filter)`.
    pub async fn notes(
        &self,
        revision: u64,
        filter: &TaskFilter,
        projects: &[Project],
    ) -> Arc<Vec<NoteRow>> {
        let mut slots = self.slots.lock().await;
        if let Some((rev, cached_filter, rows)) = &slots.notes {
            if *rev == revision && cached_filter == filter {
                return rows.clone();
            }
        }
        let rows = Arc::new(board::search_notes(projects, filter));
        slots.notes = Some((revision, filter.clone(), rows.clone()));
        rows
    }

    /// Board counters for `(revision, today)`.
    pub async fn stats(&self, revision: u64, today: NaiveDate, projects: &[Project]) -> BoardStats {
        let mut slots = self.slots.lock().await;
        if let Some((rev, day, stats)) = &slots.stats {
            if *rev == revision && *day == today {
                return *stats;
            }
        }
        let stats = BoardStats::compute(projects, today);
        slots.stats = Some((revision, today, stats));
        stats
    }
}
