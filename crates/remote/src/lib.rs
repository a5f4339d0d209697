//! Typed HTTP contract for the flowdeck tracker backend.
//!
//! - [`TrackerApi`] -- one async method per backend operation. The store
//!   consumes this trait; tests swap in scripted fakes.
//! - [`HttpTrackerApi`] -- the [`reqwest`]-backed implementation.
//! - [`RemoteConfig`] -- endpoint, token and timeout from environment
//!   variables.
//! - [`backup`] -- the export/import document shapes.
//!
//! All request and response bodies use the server's snake_case field
//! names; the two move-transaction responses additionally carry the
//! server's camelCase `deletedCommentId` / `deletedNoteId` keys.

pub mod api;
pub mod backup;
pub mod config;
pub mod error;
pub mod http;

pub use api::TrackerApi;
pub use backup::{BackupData, BackupDocument, RestoreSummary};
pub use config::RemoteConfig;
pub use error::RemoteError;
pub use http::HttpTrackerApi;
