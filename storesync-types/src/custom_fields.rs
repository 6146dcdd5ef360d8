//! Custom (typed) fields attached to resources and collection items.

use crate::reference::{Reference, ReferenceTarget};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Map of custom field name to JSON value. A `BTreeMap` keeps per-field
/// action emission order deterministic.
pub type FieldMap = BTreeMap<String, serde_json::Value>;

/// A set of custom fields backed by a field type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomFields {
    /// Reference to the backing field type.
    pub type_ref: Reference,
    /// Field name to value map.
    #[serde(default)]
    pub fields: FieldMap,
}

impl CustomFields {
    /// Creates a custom field set backed by the given type reference.
    #[must_use]
    pub fn new(type_ref: Reference, fields: FieldMap) -> Self {
        Self { type_ref, fields }
    }

    /// Returns the backing type identifier as a string, whichever side of
    /// the reference is populated. Blank means "type not set".
    #[must_use]
    pub fn type_id_str(&self) -> &str {
        match &self.type_ref.target {
            ReferenceTarget::Id(id) => id.as_str(),
            ReferenceTarget::Key(key) => key.as_str(),
        }
    }
}
