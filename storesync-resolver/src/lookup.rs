//! The key lookup seam between the resolver and the target project.

use crate::error::LookupError;
use async_trait::async_trait;
use std::collections::HashMap;
use storesync_types::{Key, ResourceId, ResourceKind};

/// Batched id-to-key lookup against the target project.
///
/// The resolver issues at most one call per resource kind per batch. The
/// returned map distinguishes three cases: `Some(key)` for a keyed resource,
/// `None` for a resource that exists without a key, and an absent entry for
/// an id with no backing resource at all.
#[async_trait]
pub trait KeyLookup: Send + Sync {
    async fn lookup_keys(
        &self,
        kind: ResourceKind,
        ids: Vec<ResourceId>,
    ) -> Result<HashMap<ResourceId, Option<Key>>, LookupError>;
}
