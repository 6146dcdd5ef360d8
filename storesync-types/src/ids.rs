//! Identifier types used throughout the storesync core.
//!
//! A `Key` is the portable, human-assigned identifier of a resource; it is
//! stable across projects and is what drafts are matched against. A
//! `ResourceId` is the platform-generated identifier, unique only within one
//! project and therefore never carried between projects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sentinel substituted for references whose backing resource exists but has
/// no key assigned. Cached like a real key so the lookup is not repeated on
/// the next sync run.
pub const KEY_IS_NOT_SET: &str = "KEY_IS_NOT_SET";

/// Portable, human-assigned identifier of a resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(String);

impl Key {
    /// Creates a key from any string-like value.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the placeholder key used for key-less referenced resources.
    #[must_use]
    pub fn placeholder() -> Self {
        Self(KEY_IS_NOT_SET.to_string())
    }

    /// Returns true if this key is the key-not-set placeholder.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.0 == KEY_IS_NOT_SET
    }

    /// Returns true if the key is empty or whitespace-only.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Key {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Platform-generated, non-portable identifier of a resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    /// Creates a resource id from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns true if the id is empty or whitespace-only.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// The kind tag of a referenced resource.
///
/// The first four kinds are synced themselves; the remainder appear only as
/// reference targets inside the synced resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    Product,
    Category,
    ProductType,
    ShoppingList,
    Channel,
    CustomerGroup,
    Type,
    State,
    TaxCategory,
}

impl ResourceKind {
    /// Returns the wire name of the kind, as used in reference payloads.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Category => "category",
            Self::ProductType => "product-type",
            Self::ShoppingList => "shopping-list",
            Self::Channel => "channel",
            Self::CustomerGroup => "customer-group",
            Self::Type => "type",
            Self::State => "state",
            Self::TaxCategory => "tax-category",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Minimal capability shared by every draft and existing resource: a key the
/// sync can match on.
pub trait HasKey {
    /// Returns the resource key.
    fn key(&self) -> &Key;
}
