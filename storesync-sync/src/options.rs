//! Engine configuration and user hooks.

use crate::error::SyncError;
use crate::strategy::ResourceStrategy;
use std::sync::Arc;

/// Hook run before each create; may transform the draft or veto the create
/// entirely by returning `None`.
pub type BeforeCreate<D> = Arc<dyn Fn(D) -> Option<D> + Send + Sync>;

/// Hook run before each update; may filter or transform the action list.
/// Returning an empty list skips the apply call.
pub type BeforeUpdate<D, E, A> = Arc<dyn Fn(Vec<A>, &D, &E) -> Vec<A> + Send + Sync>;

/// Receiver for per-item failures.
pub type ErrorCallback = Arc<dyn Fn(&SyncError) + Send + Sync>;

/// Receiver for recoverable oddities.
pub type WarningCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Configuration of one [`crate::engine::SyncEngine`].
pub struct SyncOptions<S: ResourceStrategy> {
    /// Drafts per batch. Batches run sequentially; items within one batch
    /// run concurrently.
    pub batch_size: usize,
    /// Capacity of the id-to-key cache backing reference resolution.
    pub cache_capacity: usize,
    /// How many times a version-conflicted update is re-fetched, re-diffed
    /// and re-applied before counting as failed.
    pub conflict_retries: usize,
    pub before_create: Option<BeforeCreate<S::Draft>>,
    pub before_update: Option<BeforeUpdate<S::Draft, S::Existing, S::Action>>,
    pub error_callback: Option<ErrorCallback>,
    pub warning_callback: Option<WarningCallback>,
}

impl<S: ResourceStrategy> SyncOptions<S> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            batch_size: 30,
            cache_capacity: 10_000,
            conflict_retries: 1,
            before_create: None,
            before_update: None,
            error_callback: None,
            warning_callback: None,
        }
    }

    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    #[must_use]
    pub fn with_cache_capacity(mut self, cache_capacity: usize) -> Self {
        self.cache_capacity = cache_capacity;
        self
    }

    #[must_use]
    pub fn with_conflict_retries(mut self, conflict_retries: usize) -> Self {
        self.conflict_retries = conflict_retries;
        self
    }

    #[must_use]
    pub fn with_before_create(
        mut self,
        hook: impl Fn(S::Draft) -> Option<S::Draft> + Send + Sync + 'static,
    ) -> Self {
        self.before_create = Some(Arc::new(hook));
        self
    }

    #[must_use]
    pub fn with_before_update(
        mut self,
        hook: impl Fn(Vec<S::Action>, &S::Draft, &S::Existing) -> Vec<S::Action>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        self.before_update = Some(Arc::new(hook));
        self
    }

    #[must_use]
    pub fn with_error_callback(mut self, hook: impl Fn(&SyncError) + Send + Sync + 'static) -> Self {
        self.error_callback = Some(Arc::new(hook));
        self
    }

    #[must_use]
    pub fn with_warning_callback(mut self, hook: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.warning_callback = Some(Arc::new(hook));
        self
    }
}

impl<S: ResourceStrategy> Default for SyncOptions<S> {
    fn default() -> Self {
        Self::new()
    }
}
