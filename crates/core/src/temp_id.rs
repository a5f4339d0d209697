//! Provisional-id allocation for optimistic inserts.

use std::sync::atomic::{AtomicI64, Ordering};

use crate::types::EntityId;

/// Hands out process-local provisional ids for optimistically inserted
/// entities.
///
/// Ids are negative and strictly decreasing, so they can never collide
/// with server-assigned ids (always positive) or with each other. A
/// provisional id only ever lives in the local cache: it is replaced by
/// the canonical id during reconciliation and is never sent to the
/// server or persisted.
#[derive(Debug)]
pub struct TempIdAllocator {
    next: AtomicI64,
}

impl TempIdAllocator {
    /// Allocator starting at `-1`.
    pub fn new() -> Self {
        Self::with_seed(-1)
    }

    /// Allocator starting at `seed`. The seed must be negative; tests use
    /// this to make allocated ids predictable.
    pub fn with_seed(seed: i64) -> Self {
        debug_assert!(seed < 0, "temp id seed must be negative");
        Self {
            next: AtomicI64::new(seed),
        }
    }

    /// Returns the next provisional id.
    pub fn allocate(&self) -> EntityId {
        self.next.fetch_sub(1, Ordering::Relaxed)
    }
}

impl Default for TempIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
