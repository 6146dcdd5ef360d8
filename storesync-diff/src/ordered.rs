//! Generic diff over keyed collections.
//!
//! All keyed collections (enum values, assets, line items, attribute
//! definitions) share the same split: removals, per-item changes for
//! retained keys, additions, and at most one reorder. The groups are
//! returned separately because different collections interleave them
//! differently in the final action list; the common case is
//! [`OrderedDiff::into_actions`].

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// The grouped outcome of a keyed-collection diff.
pub struct OrderedDiff<A> {
    pub removals: Vec<A>,
    pub changes: Vec<A>,
    pub additions: Vec<A>,
    pub reorder: Option<A>,
}

impl<A> OrderedDiff<A> {
    /// Returns true when no group produced an action.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.removals.is_empty()
            && self.changes.is_empty()
            && self.additions.is_empty()
            && self.reorder.is_none()
    }

    /// Flattens the groups in the canonical order: removals, per-item
    /// changes, additions, then the reorder. The reorder comes after the
    /// additions because it references keys that do not exist before them.
    #[must_use]
    pub fn into_actions(self) -> Vec<A> {
        let mut actions = self.removals;
        actions.extend(self.changes);
        actions.extend(self.additions);
        actions.extend(self.reorder);
        actions
    }
}

/// Diffs two keyed sequences.
///
/// `on_remove` sees each old item whose key is gone, `on_change` each
/// retained (old, new) pair in old order, `on_add` each new item with its
/// position in the desired sequence. `on_reorder` is called with the full
/// desired key sequence only when the retained-plus-added order differs
/// from it.
pub fn diff_ordered_keyed<Old, New, K, A>(
    old: &[Old],
    new: &[New],
    old_key: impl Fn(&Old) -> K,
    new_key: impl Fn(&New) -> K,
    mut on_remove: impl FnMut(&Old) -> Option<A>,
    mut on_change: impl FnMut(&Old, &New) -> Vec<A>,
    mut on_add: impl FnMut(&New, usize) -> Option<A>,
    on_reorder: impl FnOnce(&[K]) -> Option<A>,
) -> OrderedDiff<A>
where
    K: Eq + Hash + Clone,
{
    let new_keys: Vec<K> = new.iter().map(&new_key).collect();
    let new_index: HashMap<K, usize> = new_keys
        .iter()
        .cloned()
        .enumerate()
        .map(|(index, key)| (key, index))
        .collect();
    let old_keys: HashSet<K> = old.iter().map(&old_key).collect();

    let mut removals = Vec::new();
    let mut changes = Vec::new();
    for item in old {
        match new_index.get(&old_key(item)) {
            Some(&index) => changes.extend(on_change(item, &new[index])),
            None => removals.extend(on_remove(item)),
        }
    }

    let mut additions = Vec::new();
    for (index, item) in new.iter().enumerate() {
        if !old_keys.contains(&new_keys[index]) {
            additions.extend(on_add(item, index));
        }
    }

    let resulting: Vec<K> = old
        .iter()
        .map(&old_key)
        .filter(|key| new_index.contains_key(key))
        .chain(
            new_keys
                .iter()
                .filter(|key| !old_keys.contains(key))
                .cloned(),
        )
        .collect();
    let reorder = if resulting == new_keys {
        None
    } else {
        on_reorder(&new_keys)
    };

    OrderedDiff {
        removals,
        changes,
        additions,
        reorder,
    }
}

/// Filters a slice down to the first item per key, reporting every later
/// duplicate through `on_duplicate`.
pub fn first_per_key<'a, T, K>(
    items: &'a [T],
    key: impl Fn(&T) -> K,
    mut on_duplicate: impl FnMut(&T, &K),
) -> Vec<&'a T>
where
    K: Eq + Hash,
{
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(items.len());
    for item in items {
        let k = key(item);
        if seen.contains(&k) {
            on_duplicate(item, &k);
        } else {
            seen.insert(k);
            unique.push(item);
        }
    }
    unique
}
