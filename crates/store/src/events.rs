//! Change notification for store subscribers.
//!
//! Rust hosts have no framework re-render to lean on, so the store
//! announces every committed patch on a [`tokio::sync::broadcast`]
//! channel. UI layers subscribe and re-read the views they care about;
//! the events carry ids, not entity data.

use serde::Serialize;
use tokio::sync::broadcast;

use flowdeck_core::types::EntityId;

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// A committed store patch.
///
/// `event_type` is a dot-separated name: the operation that ran
/// (`"task.created"`, `"project.archived"`, `"store.loaded"`, ...),
/// suffixed with `.confirmed` when a canonical response was reconciled
/// and `.rollback` when a failed mutation was undone.
#[derive(Debug, Clone, Serialize)]
pub struct StoreEvent {
    pub event_type: String,
    /// Id of the entity the patch touched, when there is a single one.
    /// Provisional (negative) ids appear here for optimistic inserts.
    pub entity_id: Option<EntityId>,
    /// Store revision after the patch. Strictly increasing.
    pub revision: u64,
}

impl StoreEvent {
    /// Create an event with no entity attached.
    pub fn new(event_type: impl Into<String>, revision: u64) -> Self {
        Self {
            event_type: event_type.into(),
            entity_id: None,
            revision,
        }
    }

    /// Attach the touched entity's id.
    pub fn with_entity(mut self, entity_id: EntityId) -> Self {
        self.entity_id = Some(entity_id);
        self
    }
}

/// In-process fan-out of [`StoreEvent`]s.
pub struct ChangeBus {
    sender: broadcast::Sender<StoreEvent>,
}

impl ChangeBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest un-consumed events are dropped
    /// and slow receivers observe `RecvError::Lagged`; they should
    /// re-read the store rather than replay.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to all future events.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.sender.subscribe()
    }

    /// Publish an event to all current subscribers.
    pub fn publish(&self, event: StoreEvent) {
        // Ignore the SendError -- it only means there are zero receivers.
        let _ = self.sender.send(event);
    }
}

impl Default for ChangeBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
