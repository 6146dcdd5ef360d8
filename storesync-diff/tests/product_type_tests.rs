use pretty_assertions::assert_eq;
use storesync_diff::product_type::build_actions;
use storesync_diff::{CollectingHooks, DiffError, NoopHooks};
use storesync_types::{
    AttributeDefinition, AttributeTypeDef, EnumValue, Key, ProductType, ProductTypeDraft,
    ProductTypeUpdateAction as Action, ResourceId,
};

fn enum_definition(values: Vec<EnumValue>) -> AttributeDefinition {
    AttributeDefinition {
        name: "size".into(),
        label: "Size".into(),
        input_tip: None,
        is_required: false,
        attribute_type: AttributeTypeDef::Enum { values },
    }
}

fn existing(attributes: Vec<AttributeDefinition>) -> ProductType {
    ProductType {
        id: ResourceId::new("pt-1"),
        key: Key::new("shirt"),
        name: "Shirt".into(),
        description: None,
        attributes,
        version: 3,
    }
}

fn draft(attributes: Vec<AttributeDefinition>) -> ProductTypeDraft {
    ProductTypeDraft {
        key: Key::new("shirt"),
        name: "Shirt".into(),
        description: None,
        attributes,
    }
}

// ── Enum value reordering ─────────────────────────────────────────

#[test]
fn relabel_and_reorder_without_membership_change() {
    // Old values [a, b, c]; new [c, a, b] with `a` relabeled. Exactly one
    // label change followed by one order change, nothing else.
    let old = existing(vec![enum_definition(vec![
        EnumValue::new("a", "Alpha"),
        EnumValue::new("b", "Beta"),
        EnumValue::new("c", "Gamma"),
    ])]);
    let new = draft(vec![enum_definition(vec![
        EnumValue::new("c", "Gamma"),
        EnumValue::new("a", "Alef"),
        EnumValue::new("b", "Beta"),
    ])]);

    let actions = build_actions(&old, &new, &mut NoopHooks);

    assert_eq!(
        actions,
        vec![
            Action::ChangePlainEnumValueLabel {
                attribute_name: "size".into(),
                value: EnumValue::new("a", "Alef"),
            },
            Action::ChangePlainEnumValueOrder {
                attribute_name: "size".into(),
                keys: vec!["c".into(), "a".into(), "b".into()],
            },
        ]
    );
}

#[test]
fn removed_enum_values_collapse_into_one_action() {
    let old = existing(vec![enum_definition(vec![
        EnumValue::new("a", "Alpha"),
        EnumValue::new("b", "Beta"),
        EnumValue::new("c", "Gamma"),
    ])]);
    let new = draft(vec![enum_definition(vec![EnumValue::new("b", "Beta")])]);

    let actions = build_actions(&old, &new, &mut NoopHooks);

    assert_eq!(
        actions,
        vec![Action::RemoveEnumValues {
            attribute_name: "size".into(),
            keys: vec!["a".into(), "c".into()],
        }]
    );
}

#[test]
fn added_enum_value_comes_before_reorder() {
    let old = existing(vec![enum_definition(vec![
        EnumValue::new("a", "Alpha"),
        EnumValue::new("b", "Beta"),
    ])]);
    let new = draft(vec![enum_definition(vec![
        EnumValue::new("c", "Gamma"),
        EnumValue::new("a", "Alpha"),
        EnumValue::new("b", "Beta"),
    ])]);

    let actions = build_actions(&old, &new, &mut NoopHooks);

    assert_eq!(
        actions,
        vec![
            Action::AddPlainEnumValue {
                attribute_name: "size".into(),
                value: EnumValue::new("c", "Gamma"),
            },
            Action::ChangePlainEnumValueOrder {
                attribute_name: "size".into(),
                keys: vec!["c".into(), "a".into(), "b".into()],
            },
        ]
    );
}

// ── Attribute definitions ─────────────────────────────────────────

#[test]
fn definition_removal_change_add_and_reorder() {
    let text = |name: &str, label: &str| AttributeDefinition {
        name: name.into(),
        label: label.into(),
        input_tip: None,
        is_required: false,
        attribute_type: AttributeTypeDef::Text,
    };
    let old = existing(vec![text("color", "Color"), text("fit", "Fit")]);
    let new = draft(vec![text("material", "Material"), text("color", "Colour")]);

    let actions = build_actions(&old, &new, &mut NoopHooks);

    assert_eq!(
        actions,
        vec![
            Action::RemoveAttributeDefinition { name: "fit".into() },
            Action::ChangeAttributeDefinitionLabel {
                attribute_name: "color".into(),
                label: "Colour".into(),
            },
            Action::AddAttributeDefinition {
                definition: text("material", "Material"),
            },
            Action::ChangeAttributeOrder {
                attribute_names: vec!["material".into(), "color".into()],
            },
        ]
    );
}

#[test]
fn incompatible_type_change_is_remove_then_add() {
    let old = existing(vec![AttributeDefinition {
        name: "count".into(),
        label: "Count".into(),
        input_tip: None,
        is_required: false,
        attribute_type: AttributeTypeDef::Text,
    }]);
    let changed = AttributeDefinition {
        name: "count".into(),
        label: "Count".into(),
        input_tip: None,
        is_required: false,
        attribute_type: AttributeTypeDef::Number,
    };
    let new = draft(vec![changed.clone()]);

    let actions = build_actions(&old, &new, &mut NoopHooks);

    assert_eq!(
        actions,
        vec![
            Action::RemoveAttributeDefinition {
                name: "count".into()
            },
            Action::AddAttributeDefinition { definition: changed },
        ]
    );
}

#[test]
fn duplicate_definition_names_keep_the_first_and_report_the_rest() {
    let text = |name: &str, label: &str| AttributeDefinition {
        name: name.into(),
        label: label.into(),
        input_tip: None,
        is_required: false,
        attribute_type: AttributeTypeDef::Text,
    };
    let old = existing(vec![text("color", "Color")]);
    let new = draft(vec![text("color", "Colour"), text("color", "Shade")]);

    let mut hooks = CollectingHooks::default();
    let actions = build_actions(&old, &new, &mut hooks);

    // The first occurrence wins; no spurious order change for one name.
    assert_eq!(
        actions,
        vec![Action::ChangeAttributeDefinitionLabel {
            attribute_name: "color".into(),
            label: "Colour".into(),
        }]
    );
    assert_eq!(hooks.errors.len(), 1);
    assert!(matches!(
        &hooks.errors[0].2,
        DiffError::DuplicateKey { collection, key, .. }
            if collection == "attributes" && key == "color"
    ));
}

// ── Idempotence ───────────────────────────────────────────────────

#[test]
fn identical_sides_produce_no_actions() {
    let attributes = vec![enum_definition(vec![
        EnumValue::new("a", "Alpha"),
        EnumValue::new("b", "Beta"),
    ])];
    let actions = build_actions(&existing(attributes.clone()), &draft(attributes), &mut NoopHooks);
    assert!(actions.is_empty());
}
