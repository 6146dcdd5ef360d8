//! Cross-resource references.
//!
//! A reference points at another resource either by platform id (as fetched
//! from a source project) or by key (after resolution). Only key-based
//! references are portable; the resolver rewrites id-based references before
//! a draft reaches the diff engine.

use crate::ids::{Key, ResourceId, ResourceKind};
use serde::{Deserialize, Serialize};

/// The target of a reference: an opaque id before resolution, a portable key
/// after.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReferenceTarget {
    Id(ResourceId),
    Key(Key),
}

/// A pointer from one resource to another.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    /// Kind of the referenced resource.
    pub kind: ResourceKind,
    /// Id or key of the referenced resource.
    pub target: ReferenceTarget,
}

impl Reference {
    /// Creates an unresolved, id-based reference.
    #[must_use]
    pub fn by_id(kind: ResourceKind, id: impl Into<ResourceId>) -> Self {
        Self {
            kind,
            target: ReferenceTarget::Id(id.into()),
        }
    }

    /// Creates a resolved, key-based reference.
    #[must_use]
    pub fn by_key(kind: ResourceKind, key: impl Into<Key>) -> Self {
        Self {
            kind,
            target: ReferenceTarget::Key(key.into()),
        }
    }

    /// Returns true if the reference already carries a key.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self.target, ReferenceTarget::Key(_))
    }

    /// Returns the unresolved id, if any.
    #[must_use]
    pub fn id(&self) -> Option<&ResourceId> {
        match &self.target {
            ReferenceTarget::Id(id) => Some(id),
            ReferenceTarget::Key(_) => None,
        }
    }

    /// Returns the resolved key, if any.
    #[must_use]
    pub fn resolved_key(&self) -> Option<&Key> {
        match &self.target {
            ReferenceTarget::Key(key) => Some(key),
            ReferenceTarget::Id(_) => None,
        }
    }

    /// Rewrites the reference target to the given key.
    pub fn resolve_to(&mut self, key: Key) {
        self.target = ReferenceTarget::Key(key);
    }
}

impl From<ResourceId> for ReferenceTarget {
    fn from(id: ResourceId) -> Self {
        Self::Id(id)
    }
}

impl From<Key> for ReferenceTarget {
    fn from(key: Key) -> Self {
        Self::Key(key)
    }
}
