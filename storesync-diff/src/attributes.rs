//! Variant attribute diffing.

use storesync_types::{Attribute, AttributeValue};

/// Diffs two attribute lists by name.
///
/// `emit` is called with `Some(value)` for attributes that are new or
/// changed (in draft order) and `None` for attributes removed from the
/// draft (in existing order). The caller decides per name whether the
/// change targets one variant or all of them.
pub fn diff_attribute_lists(
    old: &[Attribute],
    new: &[Attribute],
    mut emit: impl FnMut(&str, Option<&AttributeValue>),
) {
    for attribute in new {
        let old_value = old
            .iter()
            .find(|a| a.name == attribute.name)
            .map(|a| &a.value);
        if old_value != Some(&attribute.value) {
            emit(&attribute.name, Some(&attribute.value));
        }
    }
    for attribute in old {
        if !new.iter().any(|a| a.name == attribute.name) {
            emit(&attribute.name, None);
        }
    }
}
