//! Product type diffing: attribute definitions as an ordered keyed
//! collection, plus plain and localized enum value sets per definition.

use crate::common::build_update_action;
use crate::error::DiffError;
use crate::hooks::DiffHooks;
use crate::ordered::{diff_ordered_keyed, first_per_key};
use storesync_types::product_type::AttributeTypeDef;
use storesync_types::{
    AttributeDefinition, ProductType, ProductTypeDraft, ProductTypeUpdateAction as Action,
};
use tracing::debug;

/// Builds the ordered action list converging `existing` onto `draft`.
pub fn build_actions(
    existing: &ProductType,
    draft: &ProductTypeDraft,
    hooks: &mut dyn DiffHooks,
) -> Vec<Action> {
    let mut actions = Vec::new();

    actions.extend(build_update_action(&existing.name, &draft.name, || {
        Action::ChangeName {
            name: draft.name.clone(),
        }
    }));
    actions.extend(build_update_action(
        &existing.description,
        &draft.description,
        || Action::ChangeDescription {
            description: draft.description.clone(),
        },
    ));

    let draft_definitions = first_per_key(
        &draft.attributes,
        |def| def.name.clone(),
        |_, duplicate| {
            hooks.on_error(
                &draft.key,
                "attributes",
                &DiffError::DuplicateKey {
                    resource: "product type".to_string(),
                    collection: "attributes".to_string(),
                    key: duplicate.clone(),
                },
            );
        },
    );
    let draft_definitions: Vec<_> = draft_definitions.into_iter().cloned().collect();

    let diff = diff_ordered_keyed(
        &existing.attributes,
        &draft_definitions,
        |def| def.name.clone(),
        |def| def.name.clone(),
        |def| {
            Some(Action::RemoveAttributeDefinition {
                name: def.name.clone(),
            })
        },
        diff_matched_definition,
        |def, _position| {
            Some(Action::AddAttributeDefinition {
                definition: def.clone(),
            })
        },
        |names| {
            Some(Action::ChangeAttributeOrder {
                attribute_names: names.to_vec(),
            })
        },
    );
    actions.extend(diff.into_actions());
    debug!(key = %draft.key, actions = actions.len(), "built product type update actions");
    actions
}

fn diff_matched_definition(old: &AttributeDefinition, new: &AttributeDefinition) -> Vec<Action> {
    // The value shape and required flag of a definition cannot be changed
    // in place; an incompatible definition is dropped and re-added.
    if !same_shape(&old.attribute_type, &new.attribute_type) || old.is_required != new.is_required {
        return vec![
            Action::RemoveAttributeDefinition {
                name: old.name.clone(),
            },
            Action::AddAttributeDefinition {
                definition: new.clone(),
            },
        ];
    }

    let mut actions = Vec::new();
    actions.extend(build_update_action(&old.label, &new.label, || {
        Action::ChangeAttributeDefinitionLabel {
            attribute_name: old.name.clone(),
            label: new.label.clone(),
        }
    }));
    actions.extend(build_update_action(&old.input_tip, &new.input_tip, || {
        Action::SetInputTip {
            attribute_name: old.name.clone(),
            input_tip: new.input_tip.clone(),
        }
    }));

    diff_plain_enum_values(old, new, &mut actions);
    diff_localized_enum_values(old, new, &mut actions);
    actions
}

// Same discriminant chain, descending through set wrappers. Enum value
// lists are diffable content, not part of the shape.
fn same_shape(old: &AttributeTypeDef, new: &AttributeTypeDef) -> bool {
    match (old, new) {
        (AttributeTypeDef::Set { element: a }, AttributeTypeDef::Set { element: b }) => {
            same_shape(a, b)
        }
        (AttributeTypeDef::Enum { .. }, AttributeTypeDef::Enum { .. }) => true,
        (AttributeTypeDef::LocalizedEnum { .. }, AttributeTypeDef::LocalizedEnum { .. }) => true,
        (AttributeTypeDef::Reference { kind: a }, AttributeTypeDef::Reference { kind: b }) => {
            a == b
        }
        (AttributeTypeDef::Nested { type_ref: a }, AttributeTypeDef::Nested { type_ref: b }) => {
            a == b
        }
        _ => std::mem::discriminant(old) == std::mem::discriminant(new),
    }
}

fn diff_plain_enum_values(
    old: &AttributeDefinition,
    new: &AttributeDefinition,
    actions: &mut Vec<Action>,
) {
    let (Some(old_values), Some(new_values)) = (old.enum_values(), new.enum_values()) else {
        return;
    };
    let attribute_name = &old.name;

    let mut removed_keys = Vec::new();
    let diff = diff_ordered_keyed(
        old_values,
        new_values,
        |value| value.key.clone(),
        |value| value.key.clone(),
        |value| {
            removed_keys.push(value.key.clone());
            None
        },
        |old_value, new_value| {
            build_update_action(&old_value.label, &new_value.label, || {
                Action::ChangePlainEnumValueLabel {
                    attribute_name: attribute_name.clone(),
                    value: new_value.clone(),
                }
            })
            .into_iter()
            .collect()
        },
        |value, _position| {
            Some(Action::AddPlainEnumValue {
                attribute_name: attribute_name.clone(),
                value: value.clone(),
            })
        },
        |keys| {
            Some(Action::ChangePlainEnumValueOrder {
                attribute_name: attribute_name.clone(),
                keys: keys.to_vec(),
            })
        },
    );

    // All removed keys collapse into a single removal action.
    if !removed_keys.is_empty() {
        actions.push(Action::RemoveEnumValues {
            attribute_name: attribute_name.clone(),
            keys: removed_keys,
        });
    }
    actions.extend(diff.into_actions());
}

fn diff_localized_enum_values(
    old: &AttributeDefinition,
    new: &AttributeDefinition,
    actions: &mut Vec<Action>,
) {
    let (Some(old_values), Some(new_values)) =
        (old.localized_enum_values(), new.localized_enum_values())
    else {
        return;
    };
    let attribute_name = &old.name;

    let mut removed_keys = Vec::new();
    let diff = diff_ordered_keyed(
        old_values,
        new_values,
        |value| value.key.clone(),
        |value| value.key.clone(),
        |value| {
            removed_keys.push(value.key.clone());
            None
        },
        |old_value, new_value| {
            build_update_action(&old_value.label, &new_value.label, || {
                Action::ChangeLocalizedEnumValueLabel {
                    attribute_name: attribute_name.clone(),
                    value: new_value.clone(),
                }
            })
            .into_iter()
            .collect()
        },
        |value, _position| {
            Some(Action::AddLocalizedEnumValue {
                attribute_name: attribute_name.clone(),
                value: value.clone(),
            })
        },
        |keys| {
            Some(Action::ChangeLocalizedEnumValueOrder {
                attribute_name: attribute_name.clone(),
                keys: keys.to_vec(),
            })
        },
    );

    if !removed_keys.is_empty() {
        actions.push(Action::RemoveEnumValues {
            attribute_name: attribute_name.clone(),
            keys: removed_keys,
        });
    }
    actions.extend(diff.into_actions());
}
