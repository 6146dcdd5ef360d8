//! Price diffing by composite identity.

use crate::custom_fields::{diff_custom_fields, CustomDiff};
use crate::hooks::DiffHooks;
use std::collections::HashMap;
use storesync_types::{Key, Price, PriceCompositeId, PriceValue};

/// A kind-neutral price mutation; the product diff maps these onto
/// variant-scoped update actions.
#[derive(Debug, Clone, PartialEq)]
pub enum PriceDiff {
    Remove(PriceCompositeId),
    /// Value or tier change: one action carrying the full new value.
    ChangeValue(PriceCompositeId, PriceValue),
    /// Custom-field-only change on a retained price.
    Custom(PriceCompositeId, CustomDiff),
    Add(Price),
}

/// Diffs two price lists of one variant.
///
/// Prices match when their composite identities (currency, country,
/// channel, customer group, validity window) match. Every removal precedes
/// every addition in the returned list.
pub fn diff_prices(
    resource_key: &Key,
    field: &str,
    old: &[Price],
    new: &[Price],
    hooks: &mut dyn DiffHooks,
) -> Vec<PriceDiff> {
    let new_by_id: HashMap<PriceCompositeId, &Price> =
        new.iter().map(|price| (price.composite_id(), price)).collect();
    let old_ids: Vec<PriceCompositeId> = old.iter().map(Price::composite_id).collect();

    let mut removals = Vec::new();
    let mut changes = Vec::new();
    for (price, id) in old.iter().zip(&old_ids) {
        match new_by_id.get(id) {
            None => removals.push(PriceDiff::Remove(id.clone())),
            Some(new_price) => {
                if price.value != new_price.value {
                    changes.push(PriceDiff::ChangeValue(id.clone(), new_price.value.clone()));
                }
                for diff in diff_custom_fields(
                    "price",
                    resource_key,
                    field,
                    price.custom.as_ref(),
                    new_price.custom.as_ref(),
                    hooks,
                ) {
                    changes.push(PriceDiff::Custom(id.clone(), diff));
                }
            }
        }
    }

    let mut additions = Vec::new();
    for price in new {
        if !old_ids.contains(&price.composite_id()) {
            additions.push(PriceDiff::Add(price.clone()));
        }
    }

    let mut actions = removals;
    actions.extend(changes);
    actions.extend(additions);
    actions
}
