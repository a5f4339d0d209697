//! Store-level error type.

use flowdeck_core::CoreError;
use flowdeck_remote::RemoteError;

/// Errors returned by [`crate::ProjectStore`] operations.
///
/// Local validation and lookup failures surface as [`CoreError`] before
/// any patch is applied; remote rejections surface as [`RemoteError`]
/// after the optimistic patch has been rolled back.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

impl StoreError {
    /// Returns `true` when the backend rejected the session token.
    /// Host applications use this to force a logout.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, StoreError::Remote(e) if e.is_unauthorized())
    }
}
