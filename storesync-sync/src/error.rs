//! Error types for the sync orchestrator.
//!
//! Nothing here escapes [`crate::engine::SyncEngine::sync`] as a panic or
//! return error; every value below is routed through the error callback and
//! recorded as a failure of the item it names.

use storesync_diff::DiffError;
use storesync_resolver::ResolveError;
use storesync_types::Key;
use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// A per-item sync failure.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The draft carries no usable key and cannot be matched.
    #[error("draft has a blank key and was not synced")]
    BlankKey,

    /// Reference resolution failed for the draft.
    #[error("failed to sync '{key}': {source}")]
    Resolution { key: Key, source: ResolveError },

    /// The batched fetch of existing resources failed; every draft of the
    /// batch fails with this error.
    #[error("failed to fetch existing resources: {message}")]
    Fetch { message: String },

    /// A field-level diff problem, forwarded from the diff engine.
    #[error("failed to build an update action for '{key}' ({field}): {source}")]
    Diff {
        key: Key,
        field: String,
        source: DiffError,
    },

    /// The create call failed.
    #[error("failed to create '{key}': {message}")]
    Create { key: Key, message: String },

    /// The update call failed with a non-retryable error.
    #[error("failed to update '{key}': {message}")]
    Update { key: Key, message: String },

    /// Every conflict retry was consumed without a successful apply.
    #[error("failed to update '{key}': version conflict persisted after {retries} retries")]
    RetriesExhausted { key: Key, retries: usize },
}
