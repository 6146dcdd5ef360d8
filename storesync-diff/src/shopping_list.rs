//! Shopping list diffing: scalars, custom fields, line items keyed by sku,
//! text line items keyed by name.

use crate::common::build_update_action;
use crate::custom_fields::{diff_custom_fields, CustomDiff};
use crate::error::DiffError;
use crate::hooks::DiffHooks;
use crate::ordered::{diff_ordered_keyed, first_per_key};
use storesync_types::{ShoppingList, ShoppingListDraft, ShoppingListUpdateAction as Action};
use tracing::debug;

/// Builds the ordered action list converging `existing` onto `draft`.
pub fn build_actions(
    existing: &ShoppingList,
    draft: &ShoppingListDraft,
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
        Action::SetSlug {
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
    actions.extend(build_update_action(
        &existing.delete_days_after_last_modification,
        &draft.delete_days_after_last_modification,
        || Action::SetDeleteDaysAfterLastModification {
            days: draft.delete_days_after_last_modification,
        },
    ));

    for diff in diff_custom_fields(
        "shopping list",
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

    diff_line_items(existing, draft, hooks, &mut actions);
    diff_text_line_items(existing, draft, hooks, &mut actions);
    debug!(key = %key, actions = actions.len(), "built shopping list update actions");
    actions
}

fn diff_line_items(
    existing: &ShoppingList,
    draft: &ShoppingListDraft,
    hooks: &mut dyn DiffHooks,
    actions: &mut Vec<Action>,
) {
    let resource_key = &draft.key;
    let draft_items = first_per_key(
        &draft.line_items,
        |item| item.sku.clone(),
        |_, duplicate| {
            hooks.on_error(
                resource_key,
                "lineItems",
                &DiffError::DuplicateKey {
                    resource: "shopping list".to_string(),
                    collection: "lineItems".to_string(),
                    key: duplicate.clone(),
                },
            );
        },
    );
    let draft_items: Vec<_> = draft_items.into_iter().cloned().collect();

    let diff = diff_ordered_keyed(
        &existing.line_items,
        &draft_items,
        |item| item.sku.clone(),
        |item| item.sku.clone(),
        |item| {
            Some(Action::RemoveLineItem {
                line_item_id: item.id.clone(),
            })
        },
        |old_item, new_item| {
            let mut changes = Vec::new();
            changes.extend(build_update_action(
                &old_item.quantity,
                &new_item.effective_quantity(),
                || Action::ChangeLineItemQuantity {
                    line_item_id: old_item.id.clone(),
                    quantity: new_item.effective_quantity(),
                },
            ));
            for diff in diff_custom_fields(
                "line item",
                resource_key,
                "lineItems",
                old_item.custom.as_ref(),
                new_item.custom.as_ref(),
                hooks,
            ) {
                changes.push(match diff {
                    CustomDiff::SetType { type_ref, fields } => Action::SetLineItemCustomType {
                        line_item_id: old_item.id.clone(),
                        type_ref,
                        fields,
                    },
                    CustomDiff::SetField { name, value } => Action::SetLineItemCustomField {
                        line_item_id: old_item.id.clone(),
                        name,
                        value,
                    },
                });
            }
            changes
        },
        |item, _position| {
            Some(Action::AddLineItem {
                draft: item.clone(),
            })
        },
        |skus| {
            Some(Action::ChangeLineItemsOrder {
                skus: skus.to_vec(),
            })
        },
    );

    // Per-item changes lead; an unchanged item emits nothing.
    actions.extend(diff.changes);
    actions.extend(diff.removals);
    actions.extend(diff.additions);
    actions.extend(diff.reorder);
}

fn diff_text_line_items(
    existing: &ShoppingList,
    draft: &ShoppingListDraft,
    hooks: &mut dyn DiffHooks,
    actions: &mut Vec<Action>,
) {
    let resource_key = &draft.key;
    let diff = diff_ordered_keyed(
        &existing.text_line_items,
        &draft.text_line_items,
        |item| item.name.clone(),
        |item| item.name.clone(),
        |item| {
            Some(Action::RemoveTextLineItem {
                text_line_item_id: item.id.clone(),
            })
        },
        |old_item, new_item| {
            let mut changes = Vec::new();
            changes.extend(build_update_action(
                &old_item.quantity,
                &new_item.effective_quantity(),
                || Action::ChangeTextLineItemQuantity {
                    text_line_item_id: old_item.id.clone(),
                    quantity: new_item.effective_quantity(),
                },
            ));
            changes.extend(build_update_action(
                &old_item.description,
                &new_item.description,
                || Action::SetTextLineItemDescription {
                    text_line_item_id: old_item.id.clone(),
                    description: new_item.description.clone(),
                },
            ));
            for diff in diff_custom_fields(
                "text line item",
                resource_key,
                "textLineItems",
                old_item.custom.as_ref(),
                new_item.custom.as_ref(),
                hooks,
            ) {
                changes.push(match diff {
                    CustomDiff::SetType { type_ref, fields } => {
                        Action::SetTextLineItemCustomType {
                            text_line_item_id: old_item.id.clone(),
                            type_ref,
                            fields,
                        }
                    }
                    CustomDiff::SetField { name, value } => Action::SetTextLineItemCustomField {
                        text_line_item_id: old_item.id.clone(),
                        name,
                        value,
                    },
                });
            }
            changes
        },
        |item, _position| {
            Some(Action::AddTextLineItem {
                draft: item.clone(),
            })
        },
        |names| {
            Some(Action::ChangeTextLineItemsOrder {
                names: names.to_vec(),
            })
        },
    );

    actions.extend(diff.changes);
    actions.extend(diff.removals);
    actions.extend(diff.additions);
    actions.extend(diff.reorder);
}
