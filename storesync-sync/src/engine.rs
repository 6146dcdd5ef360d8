//! The batched sync engine.
//!
//! `sync` consumes drafts in fixed-size batches. Batches are strictly
//! sequential; within one batch the resolver runs once, existing resources
//! are fetched with one call, and the per-item create/update tasks are
//! joined concurrently. A failing item never cancels its batch siblings,
//! and nothing escapes `sync` as a panic or error: the returned report
//! reflects whatever partial success was achieved.

use crate::error::SyncError;
use crate::options::{ErrorCallback, SyncOptions, WarningCallback};
use crate::services::{ApplyError, ApplyService, FetchService};
use crate::statistics::{SyncReport, SyncStatistics};
use crate::strategy::ResourceStrategy;
use futures::future::join_all;
use std::sync::Arc;
use storesync_cache::KeyCache;
use storesync_diff::hooks::DiffHooks;
use storesync_diff::DiffError;
use storesync_resolver::{KeyLookup, ReferenceResolver};
use storesync_types::{HasKey, Key};
use tracing::{debug, info, warn};

/// Batched, concurrent reconciliation of one resource kind.
pub struct SyncEngine<S: ResourceStrategy> {
    strategy: S,
    options: SyncOptions<S>,
    resolver: ReferenceResolver,
    fetch: Arc<dyn FetchService<S::Existing>>,
    apply: Arc<dyn ApplyService<S::Draft, S::Existing, S::Action>>,
}

impl<S: ResourceStrategy> SyncEngine<S> {
    /// Creates an engine with its own cache, sized by
    /// `options.cache_capacity`.
    pub fn new(
        strategy: S,
        options: SyncOptions<S>,
        lookup: Arc<dyn KeyLookup>,
        fetch: Arc<dyn FetchService<S::Existing>>,
        apply: Arc<dyn ApplyService<S::Draft, S::Existing, S::Action>>,
    ) -> Self {
        let cache = Arc::new(KeyCache::new(options.cache_capacity));
        Self::with_shared_cache(strategy, options, cache, lookup, fetch, apply)
    }

    /// Creates an engine over a caller-owned cache, so several engines (or
    /// repeated runs) can share resolved keys.
    pub fn with_shared_cache(
        strategy: S,
        options: SyncOptions<S>,
        cache: Arc<KeyCache>,
        lookup: Arc<dyn KeyLookup>,
        fetch: Arc<dyn FetchService<S::Existing>>,
        apply: Arc<dyn ApplyService<S::Draft, S::Existing, S::Action>>,
    ) -> Self {
        Self {
            strategy,
            options,
            resolver: ReferenceResolver::new(cache, lookup),
            fetch,
            apply,
        }
    }

    /// The id-to-key cache backing this engine's resolver.
    #[must_use]
    pub fn cache(&self) -> &Arc<KeyCache> {
        self.resolver.cache()
    }

    /// Reconciles the drafts against the target project and returns the
    /// run's statistics snapshot.
    pub async fn sync(&self, mut drafts: Vec<S::Draft>) -> SyncReport {
        let statistics = SyncStatistics::new();
        // The builder clamps batch_size, but the field is public; a zero
        // here would make the drain loop spin without ever shrinking.
        let batch_size = self.options.batch_size.max(1);
        info!(
            kind = %self.strategy.kind(),
            drafts = drafts.len(),
            batch_size,
            "starting sync run"
        );
        while !drafts.is_empty() {
            let tail = drafts.split_off(drafts.len().min(batch_size));
            let batch = std::mem::replace(&mut drafts, tail);
            self.sync_batch(batch, &statistics).await;
        }
        let report = statistics.report();
        info!(kind = %self.strategy.kind(), "{}", report.human_summary());
        report
    }

    async fn sync_batch(&self, batch: Vec<S::Draft>, statistics: &SyncStatistics) {
        debug!(items = batch.len(), "processing batch");

        let mut valid = Vec::with_capacity(batch.len());
        for draft in batch {
            if draft.key().is_blank() {
                statistics.record_processed();
                self.report_failure(statistics, SyncError::BlankKey);
            } else {
                valid.push(draft);
            }
        }

        let outcomes = self.resolver.resolve_batch(&mut valid).await;
        let mut ready = Vec::with_capacity(valid.len());
        for (draft, outcome) in valid.into_iter().zip(outcomes) {
            match outcome {
                Ok(()) => ready.push(draft),
                Err(source) => {
                    statistics.record_processed();
                    self.report_failure(
                        statistics,
                        SyncError::Resolution {
                            key: draft.key().clone(),
                            source,
                        },
                    );
                }
            }
        }
        if ready.is_empty() {
            return;
        }

        let keys: Vec<Key> = ready.iter().map(|draft| draft.key().clone()).collect();
        let mut existing_map = match self.fetch.fetch_existing_by_keys(&keys).await {
            Ok(map) => map,
            Err(error) => {
                // The whole batch depends on this one fetch.
                for draft in &ready {
                    statistics.record_processed();
                    self.report_failure(
                        statistics,
                        SyncError::Fetch {
                            message: format!("{error} (draft '{}')", draft.key()),
                        },
                    );
                }
                return;
            }
        };

        let tasks = ready.into_iter().map(|draft| {
            let existing = existing_map.remove(draft.key());
            self.sync_item(draft, existing, statistics)
        });
        join_all(tasks).await;
    }

    async fn sync_item(
        &self,
        draft: S::Draft,
        existing: Option<S::Existing>,
        statistics: &SyncStatistics,
    ) {
        statistics.record_processed();
        match existing {
            None => self.create_item(draft, statistics).await,
            Some(existing) => self.update_item(draft, existing, statistics).await,
        }
    }

    async fn create_item(&self, draft: S::Draft, statistics: &SyncStatistics) {
        let draft = if let Some(hook) = &self.options.before_create {
            match hook(draft) {
                Some(draft) => draft,
                None => {
                    debug!("create vetoed by hook");
                    return;
                }
            }
        } else {
            draft
        };
        let key = draft.key().clone();
        match self.apply.create(&draft).await {
            Ok(_) => {
                debug!(key = %key, "created");
                statistics.record_created();
            }
            Err(error) => self.report_failure(
                statistics,
                SyncError::Create {
                    key,
                    message: error.to_string(),
                },
            ),
        }
    }

    async fn update_item(
        &self,
        draft: S::Draft,
        mut existing: S::Existing,
        statistics: &SyncStatistics,
    ) {
        let key = draft.key().clone();
        let mut retries_left = self.options.conflict_retries;
        loop {
            let actions = {
                let mut hooks = HookBridge {
                    error: self.options.error_callback.as_ref(),
                    warning: self.options.warning_callback.as_ref(),
                };
                self.strategy.diff(&existing, &draft, &mut hooks)
            };
            let actions = match &self.options.before_update {
                Some(hook) => hook(actions, &draft, &existing),
                None => actions,
            };
            if actions.is_empty() {
                debug!(key = %key, "no update actions, skipping apply");
                return;
            }

            match self.apply.update(&existing, &actions).await {
                Ok(_) => {
                    debug!(key = %key, actions = actions.len(), "updated");
                    statistics.record_updated();
                    return;
                }
                Err(ApplyError::Conflict { message }) => {
                    if retries_left == 0 {
                        self.report_failure(
                            statistics,
                            SyncError::RetriesExhausted {
                                key,
                                retries: self.options.conflict_retries,
                            },
                        );
                        return;
                    }
                    retries_left -= 1;
                    warn!(key = %key, message = %message, "version conflict, re-fetching");
                    match self
                        .fetch
                        .fetch_existing_by_keys(std::slice::from_ref(&key))
                        .await
                    {
                        Ok(mut fresh) => match fresh.remove(&key) {
                            Some(resource) => existing = resource,
                            None => {
                                self.report_failure(
                                    statistics,
                                    SyncError::Update {
                                        key,
                                        message: "resource disappeared during conflict retry"
                                            .to_string(),
                                    },
                                );
                                return;
                            }
                        },
                        Err(error) => {
                            self.report_failure(
                                statistics,
                                SyncError::Update {
                                    key,
                                    message: error.to_string(),
                                },
                            );
                            return;
                        }
                    }
                }
                Err(ApplyError::Failed { message }) => {
                    self.report_failure(statistics, SyncError::Update { key, message });
                    return;
                }
            }
        }
    }

    fn report_failure(&self, statistics: &SyncStatistics, error: SyncError) {
        warn!(error = %error, "sync item failed");
        if let Some(callback) = &self.options.error_callback {
            callback(&error);
        }
        statistics.record_failed();
    }
}

// Forwards field-level diff reports to the user callbacks without touching
// the terminal counters; a dropped action does not fail the item.
struct HookBridge<'a> {
    error: Option<&'a ErrorCallback>,
    warning: Option<&'a WarningCallback>,
}

impl DiffHooks for HookBridge<'_> {
    fn on_error(&mut self, resource_key: &Key, field: &str, error: &DiffError) {
        if let Some(callback) = self.error {
            callback(&SyncError::Diff {
                key: resource_key.clone(),
                field: field.to_string(),
                source: error.clone(),
            });
        }
    }

    fn on_warning(&mut self, resource_key: &Key, field: &str, message: &str) {
        if let Some(callback) = self.warning {
            callback(&format!("'{resource_key}' ({field}): {message}"));
        }
    }
}
