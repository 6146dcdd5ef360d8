//! Error types for reference resolution.

use storesync_types::{ResourceId, ResourceKind};
use thiserror::Error;

/// Failure of one batched key lookup against the target project.
#[derive(Debug, Clone, Error)]
#[error("key lookup failed: {message}")]
pub struct LookupError {
    /// Human-readable cause reported by the lookup backend.
    pub message: String,
}

impl LookupError {
    /// Creates a lookup error from any displayable cause.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Per-draft resolution outcome. Cloneable because one failed batch lookup
/// fans out to every draft that referenced the affected kind.
#[derive(Debug, Clone, Error)]
pub enum ResolveError {
    /// A referenced resource does not exist in the target project.
    #[error("failed to resolve {kind} reference: no resource with id '{id}'")]
    UnknownId { kind: ResourceKind, id: ResourceId },

    /// The batched key lookup for a whole kind failed; every draft
    /// referencing that kind fails with this error.
    #[error("batch key lookup for {kind} failed: {source}")]
    BatchFetch {
        kind: ResourceKind,
        source: LookupError,
    },
}
