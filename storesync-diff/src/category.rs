//! Category diffing: scalars, parent, order hint, custom fields, assets.

use crate::common::build_update_action;
use crate::custom_fields::{diff_custom_fields, CustomDiff};
use crate::hooks::DiffHooks;
use crate::ordered::diff_ordered_keyed;
use storesync_types::{Category, CategoryDraft, CategoryUpdateAction as Action};
use tracing::debug;

/// Builds the ordered action list converging `existing` onto `draft`.
pub fn build_actions(
    existing: &Category,
    draft: &CategoryDraft,
    hooks: &mut dyn DiffHooks,
) -> Vec<Action> {
    let mut actions = Vec::new();
    let key = &draft.key;

    actions.extend(build_update_action(&existing.name, &draft.name, || {
        Action::ChangeName {
            name: draft.name.clone(),
        }
    }));
    actions.extend(build_update_action(&existing.slug, &draft.slug, || {
        Action::ChangeSlug {
            slug: draft.slug.clone(),
        }
    }));
    actions.extend(build_update_action(
        &existing.description,
        &draft.description,
        || Action::SetDescription {
            description: draft.description.clone(),
        },
    ));

    // A parent can be changed but not unset; a draft without one leaves the
    // existing parent alone.
    match (&existing.parent, &draft.parent) {
        (_, Some(parent)) if existing.parent.as_ref() != Some(parent) => {
            actions.push(Action::ChangeParent {
                parent: parent.clone(),
            });
        }
        (Some(_), None) => {
            hooks.on_warning(key, "parent", "draft has no parent reference, keeping the existing one");
        }
        _ => {}
    }
    match (&existing.order_hint, &draft.order_hint) {
        (_, Some(hint)) if existing.order_hint.as_ref() != Some(hint) => {
            actions.push(Action::ChangeOrderHint {
                order_hint: Some(hint.clone()),
            });
        }
        (Some(_), None) => {
            hooks.on_warning(key, "orderHint", "draft has no order hint, keeping the existing one");
        }
        _ => {}
    }

    actions.extend(build_update_action(
        &existing.meta_title,
        &draft.meta_title,
        || Action::SetMetaTitle {
            meta_title: draft.meta_title.clone(),
        },
    ));
    actions.extend(build_update_action(
        &existing.meta_description,
        &draft.meta_description,
        || Action::SetMetaDescription {
            meta_description: draft.meta_description.clone(),
        },
    ));

    for diff in diff_custom_fields(
        "category",
        key,
        "custom",
        existing.custom.as_ref(),
        draft.custom.as_ref(),
        hooks,
    ) {
        actions.push(match diff {
            CustomDiff::SetType { type_ref, fields } => Action::SetCustomType { type_ref, fields },
            CustomDiff::SetField { name, value } => Action::SetCustomField { name, value },
        });
    }

    diff_assets(existing, draft, hooks, &mut actions);
    debug!(key = %key, actions = actions.len(), "built category update actions");
    actions
}

fn diff_assets(
    existing: &Category,
    draft: &CategoryDraft,
    hooks: &mut dyn DiffHooks,
    actions: &mut Vec<Action>,
) {
    let resource_key = &draft.key;
    let diff = diff_ordered_keyed(
        &existing.assets,
        &draft.assets,
        |asset| asset.key.clone(),
        |asset| asset.key.clone(),
        |asset| {
            Some(Action::RemoveAsset {
                asset_key: asset.key.clone(),
            })
        },
        |old_asset, new_asset| {
            let mut changes = Vec::new();
            changes.extend(build_update_action(&old_asset.name, &new_asset.name, || {
                Action::ChangeAssetName {
                    asset_key: old_asset.key.clone(),
                    name: new_asset.name.clone(),
                }
            }));
            changes.extend(build_update_action(
                &old_asset.sources,
                &new_asset.sources,
                || Action::SetAssetSources {
                    asset_key: old_asset.key.clone(),
                    sources: new_asset.sources.clone(),
                },
            ));
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
                        asset_key: old_asset.key.clone(),
                        type_ref,
                        fields,
                    },
                    CustomDiff::SetField { name, value } => Action::SetAssetCustomField {
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
                asset: asset.clone(),
                position: Some(position),
            })
        },
        |keys| {
            Some(Action::ChangeAssetOrder {
                asset_keys: keys.to_vec(),
            })
        },
    );
    actions.extend(diff.into_actions());
}
