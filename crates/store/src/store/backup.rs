//! Backup export and restore.

use flowdeck_remote::{BackupDocument, RestoreSummary};

use crate::error::StoreError;

use super::ProjectStore;

impl ProjectStore {
    /// Export the signed-in user's full dataset. Pure passthrough; the
    /// local tree is not touched.
    pub async fn backup(&self) -> Result<BackupDocument, StoreError> {
        Ok(self.api.backup().await?)
    }

    /// Import `doc` server-side, then reload the whole tree.
    ///
    /// Restore replaces every row and invalidates every cached id, so
    /// there is no incremental reconciliation -- the follow-up is a
    /// full [`load`](Self::load). A failed reload lands in the sticky
    /// load-error flag like any other load failure; the restore
    /// summary is still returned because the import itself succeeded.
    pub async fn restore(&self, doc: &BackupDocument) -> Result<RestoreSummary, StoreError> {
        let summary = self.api.restore(doc).await?;
        if let Err(err) = self.load().await {
            tracing::warn!(error = %err, "reload after restore failed");
        }
        Ok(summary)
    }
}
