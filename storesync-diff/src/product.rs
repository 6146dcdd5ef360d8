//! Product diffing: scalars, categories, variants (skus, prices, images,
//! assets, attributes), master variant, and the terminal publish action.

use crate::attributes::diff_attribute_lists;
use crate::common::build_update_action;
use crate::custom_fields::{diff_custom_fields, CustomDiff};
use crate::error::DiffError;
use crate::hooks::DiffHooks;
use crate::images::{diff_images, ImageDiff};
use crate::ordered::{diff_ordered_keyed, first_per_key};
use crate::prices::{diff_prices, PriceDiff};
use std::collections::HashMap;
use storesync_types::{
    AttributeMetaData, Key, Product, ProductDraft, ProductUpdateAction as Action, ProductVariant,
};
use tracing::debug;

/// Builds the ordered action list converging `existing` onto `draft`.
///
/// `metadata` maps attribute names to their sharing constraint; attributes
/// without an entry are skipped with an error report. The publish action,
/// when warranted, is always the final element.
pub fn build_actions(
    existing: &Product,
    draft: &ProductDraft,
    metadata: &HashMap<String, AttributeMetaData>,
    hooks: &mut dyn DiffHooks,
) -> Vec<Action> {
    let mut actions = Vec::new();
    let key = &draft.key;

    actions.extend(build_update_action(&existing.name, &draft.name, || Action::ChangeName {
        name: draft.name.clone(),
    }));
    actions.extend(build_update_action(&existing.slug, &draft.slug, || Action::ChangeSlug {
        slug: draft.slug.clone(),
    }));
    actions.extend(build_update_action(&existing.description, &draft.description, || {
        Action::SetDescription {
            description: draft.description.clone(),
        }
    }));
    actions.extend(build_update_action(&existing.meta_title, &draft.meta_title, || {
        Action::SetMetaTitle {
            meta_title: draft.meta_title.clone(),
        }
    }));
    actions.extend(build_update_action(&existing.meta_description, &draft.meta_description, || {
        Action::SetMetaDescription {
            meta_description: draft.meta_description.clone(),
        }
    }));
    actions.extend(build_update_action(&existing.tax_category, &draft.tax_category, || {
        Action::SetTaxCategory {
            tax_category: draft.tax_category.clone(),
        }
    }));

    diff_categories(existing, draft, &mut actions);
    diff_variants(existing, draft, metadata, hooks, &mut actions);
    diff_shared_attributes(existing, draft, metadata, &mut actions);

    if !actions.is_empty() && (existing.published || draft.publish) {
        actions.push(Action::Publish);
    }
    debug!(key = %key, actions = actions.len(), "built product update actions");
    actions
}

fn diff_categories(existing: &Product, draft: &ProductDraft, actions: &mut Vec<Action>) {
    for category in &existing.categories {
        if !draft.categories.contains(category) {
            actions.push(Action::RemoveFromCategory {
                category: category.clone(),
            });
        }
    }
    for (category_key, hint) in &draft.category_order_hints {
        if existing.category_order_hints.get(category_key) != Some(hint) {
            actions.push(Action::SetCategoryOrderHint {
                category_key: category_key.clone(),
                order_hint: Some(hint.clone()),
            });
        }
    }
    for category_key in existing.category_order_hints.keys() {
        if !draft.category_order_hints.contains_key(category_key) {
            actions.push(Action::SetCategoryOrderHint {
                category_key: category_key.clone(),
                order_hint: None,
            });
        }
    }
    for category in &draft.categories {
        if !existing.categories.contains(category) {
            actions.push(Action::AddToCategory {
                category: category.clone(),
            });
        }
    }
}

fn diff_variants(
    existing: &Product,
    draft: &ProductDraft,
    metadata: &HashMap<String, AttributeMetaData>,
    hooks: &mut dyn DiffHooks,
    actions: &mut Vec<Action>,
) {
    let resource_key = &draft.key;
    let draft_variants = first_per_key(
        &draft.variants,
        |v| v.key.clone(),
        |_, duplicate| {
            hooks.on_error(
                resource_key,
                "variants",
                &DiffError::DuplicateKey {
                    resource: "product".to_string(),
                    collection: "variants".to_string(),
                    key: duplicate.to_string(),
                },
            );
        },
    );
    let draft_has = |key: &Key| draft_variants.iter().any(|v| &v.key == key);

    // The old master is never removed before the master change below.
    for variant in &existing.variants {
        if !draft_has(&variant.key) && variant.key != existing.master_variant_key {
            actions.push(Action::RemoveVariant {
                variant_key: variant.key.clone(),
            });
        }
    }

    for variant in &existing.variants {
        if let Some(new_variant) = draft_variants.iter().find(|v| v.key == variant.key) {
            diff_matched_variant(resource_key, variant, new_variant, metadata, hooks, actions);
        }
    }

    for (position, variant) in draft_variants.iter().enumerate() {
        if existing.variant_by_key(&variant.key).is_none() {
            actions.push(Action::AddVariant {
                variant: (*variant).clone(),
                position: Some(position),
            });
        }
    }

    if existing.master_variant_key != draft.master_variant_key {
        actions.push(Action::ChangeMasterVariant {
            variant_key: draft.master_variant_key.clone(),
        });
        if !draft_has(&existing.master_variant_key) {
            actions.push(Action::RemoveVariant {
                variant_key: existing.master_variant_key.clone(),
            });
        }
    }
}

fn diff_matched_variant(
    resource_key: &Key,
    old: &ProductVariant,
    new: &ProductVariant,
    metadata: &HashMap<String, AttributeMetaData>,
    hooks: &mut dyn DiffHooks,
    actions: &mut Vec<Action>,
) {
    let variant_key = &old.key;

    actions.extend(build_update_action(&old.sku, &new.sku, || Action::SetSku {
        variant_key: variant_key.clone(),
        sku: new.sku.clone(),
    }));

    for diff in diff_prices(resource_key, "prices", &old.prices, &new.prices, hooks) {
        actions.push(match diff {
            PriceDiff::Remove(price_id) => Action::RemovePrice {
                variant_key: variant_key.clone(),
                price_id,
            },
            PriceDiff::ChangeValue(price_id, value) => Action::ChangePrice {
                variant_key: variant_key.clone(),
                price_id,
                value,
            },
            PriceDiff::Custom(price_id, CustomDiff::SetType { type_ref, fields }) => {
                Action::SetPriceCustomType {
                    variant_key: variant_key.clone(),
                    price_id,
                    type_ref,
                    fields,
                }
            }
            PriceDiff::Custom(price_id, CustomDiff::SetField { name, value }) => {
                Action::SetPriceCustomField {
                    variant_key: variant_key.clone(),
                    price_id,
                    name,
                    value,
                }
            }
            PriceDiff::Add(price) => Action::AddPrice {
                variant_key: variant_key.clone(),
                price,
            },
        });
    }

    for diff in diff_images(&old.images, &new.images) {
        actions.push(match diff {
            ImageDiff::Remove(url) => Action::RemoveImage {
                variant_key: variant_key.clone(),
                url,
            },
            ImageDiff::Add(image, _) => Action::AddExternalImage {
                variant_key: variant_key.clone(),
                image,
            },
            ImageDiff::Move(url, position) => Action::MoveImageToPosition {
                variant_key: variant_key.clone(),
                url,
                position,
            },
        });
    }

    diff_variant_assets(resource_key, old, new, hooks, actions);
    diff_variant_attributes(resource_key, old, new, metadata, hooks, actions);
}

fn diff_variant_assets(
    resource_key: &Key,
    old: &ProductVariant,
    new: &ProductVariant,
    hooks: &mut dyn DiffHooks,
    actions: &mut Vec<Action>,
) {
    let variant_key = old.key.clone();
    let diff = diff_ordered_keyed(
        &old.assets,
        &new.assets,
        |asset| asset.key.clone(),
        |asset| asset.key.clone(),
        |asset| {
            Some(Action::RemoveAsset {
                variant_key: variant_key.clone(),
                asset_key: asset.key.clone(),
            })
        },
        |old_asset, new_asset| {
            let mut changes = Vec::new();
            changes.extend(build_update_action(&old_asset.name, &new_asset.name, || {
                Action::ChangeAssetName {
                    variant_key: variant_key.clone(),
                    asset_key: old_asset.key.clone(),
                    name: new_asset.name.clone(),
                }
            }));
            changes.extend(build_update_action(&old_asset.sources, &new_asset.sources, || {
                Action::SetAssetSources {
                    variant_key: variant_key.clone(),
                    asset_key: old_asset.key.clone(),
                    sources: new_asset.sources.clone(),
                }
            }));
            for diff in diff_custom_fields(
                "asset",
                resource_key,
                "assets",
                old_asset.custom.as_ref(),
                new_asset.custom.as_ref(),
                hooks,
            ) {
                changes.push(match diff {
                    CustomDiff::SetType { type_ref, fields } => Action::SetAssetCustomType {
                        variant_key: variant_key.clone(),
                        asset_key: old_asset.key.clone(),
                        type_ref,
                        fields,
                    },
                    CustomDiff::SetField { name, value } => Action::SetAssetCustomField {
                        variant_key: variant_key.clone(),
                        asset_key: old_asset.key.clone(),
                        name,
                        value,
                    },
                });
            }
            changes
        },
        |asset, position| {
            Some(Action::AddAsset {
                variant_key: variant_key.clone(),
                asset: asset.clone(),
                position: Some(position),
            })
        },
        |keys| {
            Some(Action::ChangeAssetOrder {
                variant_key: variant_key.clone(),
                asset_keys: keys.to_vec(),
            })
        },
    );
    actions.extend(diff.into_actions());
}

fn diff_variant_attributes(
    resource_key: &Key,
    old: &ProductVariant,
    new: &ProductVariant,
    metadata: &HashMap<String, AttributeMetaData>,
    hooks: &mut dyn DiffHooks,
    actions: &mut Vec<Action>,
) {
    let variant_key = &old.key;
    let mut pending = Vec::new();
    diff_attribute_lists(&old.attributes, &new.attributes, |name, value| {
        pending.push((name.to_string(), value.cloned()));
    });
    for (name, value) in pending {
        match metadata.get(&name) {
            None => hooks.on_error(
                resource_key,
                "attributes",
                &DiffError::UnknownAttribute {
                    resource: "product".to_string(),
                    name,
                },
            ),
            // Shared attributes are diffed once at product level.
            Some(meta) if meta.same_for_all => {}
            Some(_) => actions.push(Action::SetAttribute {
                variant_key: variant_key.clone(),
                name,
                value,
            }),
        }
    }
}

// Shared attributes are compared on the master variant pair and applied to
// every variant with one action.
fn diff_shared_attributes(
    existing: &Product,
    draft: &ProductDraft,
    metadata: &HashMap<String, AttributeMetaData>,
    actions: &mut Vec<Action>,
) {
    let empty = Vec::new();
    let old = existing
        .master_variant()
        .map_or(&empty, |v| &v.attributes);
    let new = draft.master_variant().map_or(&empty, |v| &v.attributes);

    let mut pending = Vec::new();
    diff_attribute_lists(old, new, |name, value| {
        pending.push((name.to_string(), value.cloned()));
    });
    for (name, value) in pending {
        // Per-variant and unknown names were handled (or reported) in the
        // per-variant pass.
        if metadata.get(&name).is_some_and(|meta| meta.same_for_all) {
            actions.push(Action::SetAttributeInAllVariants { name, value });
        }
    }
}
