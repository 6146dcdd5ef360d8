//! Collaborator seams to the target project.
//!
//! The engine is transport-agnostic; hosts implement these two traits on
//! top of whatever client they use.

use async_trait::async_trait;
use std::collections::HashMap;
use storesync_types::Key;
use thiserror::Error;

/// Failure of a fetch call.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ServiceError {
    pub message: String,
}

impl ServiceError {
    /// Creates a service error from any displayable cause.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Failure of a create or update call.
#[derive(Debug, Clone, Error)]
pub enum ApplyError {
    /// The resource version moved under us; retryable by re-fetching and
    /// re-diffing.
    #[error("stale version: {message}")]
    Conflict { message: String },

    /// Any other apply failure; not retried.
    #[error("{message}")]
    Failed { message: String },
}

/// Batched lookup of existing resources by key.
#[async_trait]
pub trait FetchService<Existing>: Send + Sync {
    /// Returns the existing resources for the given keys; keys with no
    /// match are simply absent from the map.
    async fn fetch_existing_by_keys(
        &self,
        keys: &[Key],
    ) -> Result<HashMap<Key, Existing>, ServiceError>;
}

/// Create and update calls against the target project.
#[async_trait]
pub trait ApplyService<Draft, Existing, Action>: Send + Sync {
    async fn create(&self, draft: &Draft) -> Result<Existing, ApplyError>;

    async fn update(
        &self,
        existing: &Existing,
        actions: &[Action],
    ) -> Result<Existing, ApplyError>;
}
