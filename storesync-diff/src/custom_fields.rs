//! Custom-field diffing.
//!
//! The outcome is expressed as kind-neutral [`CustomDiff`] values; each
//! resource diff maps them onto its own action variants (resource-level,
//! price-level, asset-level, line-item-level custom fields all share these
//! rules).

use crate::error::DiffError;
use crate::hooks::DiffHooks;
use storesync_types::{CustomFields, FieldMap, Key, Reference};

/// A kind-neutral custom-field mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum CustomDiff {
    /// Replace (or with `None`, remove) the backing type, carrying the full
    /// new field map. Supersedes any per-field diff.
    SetType {
        type_ref: Option<Reference>,
        fields: FieldMap,
    },
    /// Set one field to a new value, or remove it with `None`.
    SetField {
        name: String,
        value: Option<serde_json::Value>,
    },
}

/// Diffs two optional custom-field sets.
///
/// `resource` names the carrying resource for error messages (for example
/// "category" or "price"); `field` scopes hook reports.
pub fn diff_custom_fields(
    resource: &str,
    resource_key: &Key,
    field: &str,
    old: Option<&CustomFields>,
    new: Option<&CustomFields>,
    hooks: &mut dyn DiffHooks,
) -> Vec<CustomDiff> {
    match (old, new) {
        (None, None) => Vec::new(),
        (None, Some(new)) => {
            if new.type_id_str().trim().is_empty() {
                hooks.on_error(
                    resource_key,
                    field,
                    &DiffError::BlankCustomTypeId {
                        resource: resource.to_string(),
                    },
                );
                return Vec::new();
            }
            vec![CustomDiff::SetType {
                type_ref: Some(new.type_ref.clone()),
                fields: new.fields.clone(),
            }]
        }
        (Some(_), None) => vec![CustomDiff::SetType {
            type_ref: None,
            fields: FieldMap::new(),
        }],
        (Some(old), Some(new)) => {
            let old_id = old.type_id_str().trim();
            let new_id = new.type_id_str().trim();
            if old_id.is_empty() && new_id.is_empty() {
                hooks.on_error(
                    resource_key,
                    field,
                    &DiffError::CustomTypeIdsUnset {
                        resource: resource.to_string(),
                    },
                );
                return Vec::new();
            }
            if old_id.is_empty() || new_id.is_empty() {
                hooks.on_error(
                    resource_key,
                    field,
                    &DiffError::BlankCustomTypeId {
                        resource: resource.to_string(),
                    },
                );
                return Vec::new();
            }
            if old_id != new_id {
                return vec![CustomDiff::SetType {
                    type_ref: Some(new.type_ref.clone()),
                    fields: new.fields.clone(),
                }];
            }
            diff_fields(&old.fields, &new.fields)
        }
    }
}

// Same backing type on both sides: per-field add/change/remove-to-null.
// BTreeMap iteration keeps the emission order deterministic.
fn diff_fields(old: &FieldMap, new: &FieldMap) -> Vec<CustomDiff> {
    let mut actions = Vec::new();
    for (name, value) in new {
        if old.get(name) != Some(value) {
            actions.push(CustomDiff::SetField {
                name: name.clone(),
                value: Some(value.clone()),
            });
        }
    }
    for name in old.keys() {
        if !new.contains_key(name) {
            actions.push(CustomDiff::SetField {
                name: name.clone(),
                value: None,
            });
        }
    }
    actions
}
