//! Domain types and pure logic for the flowdeck client cache.
//!
//! Everything in this crate is synchronous and side-effect free:
//!
//! - [`project`], [`task`], [`note`] -- the entity tree (projects own
//!   tasks and notes, tasks own comments) plus create/update payloads
//!   and validation.
//! - [`task::TaskStatus`] -- calendar-date status classification.
//! - [`filter`] -- the composable task filter predicate.
//! - [`board`] -- flattened and ordered projections of the project tree.
//! - [`temp_id`] -- allocator for provisional (negative) entity ids used
//!   by optimistic inserts.
//!
//! The async store and the HTTP contract live in the `flowdeck-store`
//! and `flowdeck-remote` crates.

pub mod board;
pub mod dates;
pub mod error;
pub mod filter;
pub mod note;
pub mod project;
pub mod task;
pub mod temp_id;
pub mod types;

pub use error::CoreError;
pub use types::{EntityId, Timestamp};
