//! The flowdeck aggregate store and optimistic mutation engine.
//!
//! [`ProjectStore`] holds the signed-in user's whole project tree in
//! memory and applies every mutation optimistically:
//!
//! 1. patch the local tree synchronously (creates insert a provisional
//!    entity with a negative id and a `pending` marker),
//! 2. await the backend call with no lock held,
//! 3. reconcile the canonical response into the tree, or apply the
//!    recorded inverse patch and return the error.
//!
//! Reads never block on the network; subscribers learn about every
//! committed patch through the [`ChangeBus`]. Derived projections
//! (flattened task list, project ordering, filtering, stats) are
//! memoized per revision in [`ProjectStore`]'s view cache.

mod rollback;
mod state;
mod views;

pub mod error;
pub mod events;
pub mod store;

pub use error::StoreError;
pub use events::{ChangeBus, StoreEvent};
pub use store::ProjectStore;
