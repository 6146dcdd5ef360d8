//! Batched reference resolution.

use crate::error::{LookupError, ResolveError};
use crate::lookup::KeyLookup;
use crate::references::HasReferences;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;
use storesync_cache::KeyCache;
use storesync_types::{Key, ResourceId, ResourceKind};
use tracing::{debug, warn};

/// Rewrites id-based references in draft batches to key-based ones.
///
/// Resolution is batched: one lookup call per referenced resource kind per
/// batch, regardless of how many drafts or references are involved. Keys
/// found earlier are served from the shared cache, and resources that exist
/// without a key are substituted with the placeholder key and cached the
/// same way so the lookup is not repeated.
pub struct ReferenceResolver {
    cache: Arc<KeyCache>,
    lookup: Arc<dyn KeyLookup>,
}

impl ReferenceResolver {
    /// Creates a resolver over the given cache and lookup backend.
    #[must_use]
    pub fn new(cache: Arc<KeyCache>, lookup: Arc<dyn KeyLookup>) -> Self {
        Self { cache, lookup }
    }

    /// Returns the shared cache handle.
    #[must_use]
    pub fn cache(&self) -> &Arc<KeyCache> {
        &self.cache
    }

    /// Resolves every reference in every draft of the batch, in place.
    ///
    /// The returned vector is parallel to `drafts`. A draft succeeds only if
    /// all of its references resolved; drafts that referenced a nonexistent
    /// id fail individually, and a failed batch lookup fails every draft
    /// that referenced the affected kind. Successfully resolved drafts are
    /// untouched by failures of their batch neighbours.
    pub async fn resolve_batch<D: HasReferences>(
        &self,
        drafts: &mut [D],
    ) -> Vec<Result<(), ResolveError>> {
        let mut wanted: BTreeMap<ResourceKind, BTreeSet<ResourceId>> = BTreeMap::new();
        for draft in drafts.iter() {
            draft.visit_references(&mut |reference| {
                if let Some(id) = reference.id() {
                    if !id.is_blank() && !self.cache.contains(id) {
                        wanted.entry(reference.kind).or_default().insert(id.clone());
                    }
                }
            });
        }

        let mut failed_kinds: HashMap<ResourceKind, LookupError> = HashMap::new();
        for (kind, ids) in wanted {
            let requested: Vec<ResourceId> = ids.iter().cloned().collect();
            debug!(kind = %kind, ids = requested.len(), "looking up reference keys");
            match self.lookup.lookup_keys(kind, requested).await {
                Ok(found) => {
                    for id in ids {
                        match found.get(&id) {
                            Some(Some(key)) => self.cache.put(id, key.clone()),
                            Some(None) => {
                                debug!(kind = %kind, id = %id, "referenced resource has no key");
                                self.cache.put(id, Key::placeholder());
                            }
                            // Nonexistent ids stay uncached so a later run
                            // retries them.
                            None => {}
                        }
                    }
                }
                Err(error) => {
                    warn!(kind = %kind, error = %error, "batch key lookup failed");
                    failed_kinds.insert(kind, error);
                }
            }
        }

        drafts
            .iter_mut()
            .map(|draft| {
                let mut outcome: Result<(), ResolveError> = Ok(());
                draft.visit_references(&mut |reference| {
                    if outcome.is_err() {
                        return;
                    }
                    let Some(id) = reference.id() else { return };
                    // A cache hit never depended on this batch's lookups,
                    // so a failed lookup for the kind does not taint it.
                    if self.cache.contains(id) {
                        return;
                    }
                    if let Some(error) = failed_kinds.get(&reference.kind) {
                        outcome = Err(ResolveError::BatchFetch {
                            kind: reference.kind,
                            source: error.clone(),
                        });
                    } else {
                        outcome = Err(ResolveError::UnknownId {
                            kind: reference.kind,
                            id: id.clone(),
                        });
                    }
                });
                if outcome.is_ok() {
                    draft.visit_references_mut(&mut |reference| {
                        let key = reference.id().and_then(|id| self.cache.get(id));
                        if let Some(key) = key {
                            reference.resolve_to(key);
                        }
                    });
                }
                outcome
            })
            .collect()
    }

    /// Resolves a single draft. Convenience over [`Self::resolve_batch`].
    pub async fn resolve<D: HasReferences>(&self, draft: &mut D) -> Result<(), ResolveError> {
        self.resolve_batch(std::slice::from_mut(draft))
            .await
            .pop()
            .unwrap_or(Ok(()))
    }
}
