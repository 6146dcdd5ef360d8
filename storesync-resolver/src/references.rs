//! Reference discovery over draft resources.
//!
//! Each draft kind knows where its references live; the resolver only needs
//! a uniform way to visit them, first immutably (to collect ids for the
//! batched lookup) and then mutably (to substitute keys).

use storesync_types::product_type::AttributeTypeDef;
use storesync_types::{
    Asset, CategoryDraft, CustomFields, Price, ProductDraft, ProductTypeDraft, ProductVariant,
    Reference, ShoppingListDraft,
};

/// A draft whose embedded references the resolver can walk.
pub trait HasReferences {
    /// Visits every reference in the draft.
    fn visit_references(&self, f: &mut dyn FnMut(&Reference));

    /// Visits every reference in the draft mutably.
    fn visit_references_mut(&mut self, f: &mut dyn FnMut(&mut Reference));
}

fn visit_custom(custom: &Option<CustomFields>, f: &mut dyn FnMut(&Reference)) {
    if let Some(custom) = custom {
        f(&custom.type_ref);
    }
}

fn visit_custom_mut(custom: &mut Option<CustomFields>, f: &mut dyn FnMut(&mut Reference)) {
    if let Some(custom) = custom {
        f(&mut custom.type_ref);
    }
}

fn visit_price(price: &Price, f: &mut dyn FnMut(&Reference)) {
    if let Some(channel) = &price.channel {
        f(channel);
    }
    if let Some(group) = &price.customer_group {
        f(group);
    }
    visit_custom(&price.custom, f);
}

fn visit_price_mut(price: &mut Price, f: &mut dyn FnMut(&mut Reference)) {
    if let Some(channel) = &mut price.channel {
        f(channel);
    }
    if let Some(group) = &mut price.customer_group {
        f(group);
    }
    visit_custom_mut(&mut price.custom, f);
}

fn visit_asset(asset: &Asset, f: &mut dyn FnMut(&Reference)) {
    visit_custom(&asset.custom, f);
}

fn visit_asset_mut(asset: &mut Asset, f: &mut dyn FnMut(&mut Reference)) {
    visit_custom_mut(&mut asset.custom, f);
}

fn visit_variant(variant: &ProductVariant, f: &mut dyn FnMut(&Reference)) {
    for price in &variant.prices {
        visit_price(price, f);
    }
    for asset in &variant.assets {
        visit_asset(asset, f);
    }
    for attribute in &variant.attributes {
        attribute.value.for_each_reference(&mut |r| f(r));
    }
}

fn visit_variant_mut(variant: &mut ProductVariant, f: &mut dyn FnMut(&mut Reference)) {
    for price in &mut variant.prices {
        visit_price_mut(price, f);
    }
    for asset in &mut variant.assets {
        visit_asset_mut(asset, f);
    }
    for attribute in &mut variant.attributes {
        attribute.value.for_each_reference_mut(&mut |r| f(r));
    }
}

impl HasReferences for ProductDraft {
    fn visit_references(&self, f: &mut dyn FnMut(&Reference)) {
        f(&self.product_type);
        if let Some(tax_category) = &self.tax_category {
            f(tax_category);
        }
        for category in &self.categories {
            f(category);
        }
        for variant in &self.variants {
            visit_variant(variant, f);
        }
    }

    fn visit_references_mut(&mut self, f: &mut dyn FnMut(&mut Reference)) {
        f(&mut self.product_type);
        if let Some(tax_category) = &mut self.tax_category {
            f(tax_category);
        }
        for category in &mut self.categories {
            f(category);
        }
        for variant in &mut self.variants {
            visit_variant_mut(variant, f);
        }
    }
}

impl HasReferences for CategoryDraft {
    fn visit_references(&self, f: &mut dyn FnMut(&Reference)) {
        if let Some(parent) = &self.parent {
            f(parent);
        }
        visit_custom(&self.custom, f);
        for asset in &self.assets {
            visit_asset(asset, f);
        }
    }

    fn visit_references_mut(&mut self, f: &mut dyn FnMut(&mut Reference)) {
        if let Some(parent) = &mut self.parent {
            f(parent);
        }
        visit_custom_mut(&mut self.custom, f);
        for asset in &mut self.assets {
            visit_asset_mut(asset, f);
        }
    }
}

fn visit_type_def(ty: &AttributeTypeDef, f: &mut dyn FnMut(&Reference)) {
    match ty {
        AttributeTypeDef::Nested { type_ref } => f(type_ref),
        AttributeTypeDef::Set { element } => visit_type_def(element, f),
        _ => {}
    }
}

fn visit_type_def_mut(ty: &mut AttributeTypeDef, f: &mut dyn FnMut(&mut Reference)) {
    match ty {
        AttributeTypeDef::Nested { type_ref } => f(type_ref),
        AttributeTypeDef::Set { element } => visit_type_def_mut(element, f),
        _ => {}
    }
}

impl HasReferences for ProductTypeDraft {
    fn visit_references(&self, f: &mut dyn FnMut(&Reference)) {
        for definition in &self.attributes {
            visit_type_def(&definition.attribute_type, f);
        }
    }

    fn visit_references_mut(&mut self, f: &mut dyn FnMut(&mut Reference)) {
        for definition in &mut self.attributes {
            visit_type_def_mut(&mut definition.attribute_type, f);
        }
    }
}

impl HasReferences for ShoppingListDraft {
    fn visit_references(&self, f: &mut dyn FnMut(&Reference)) {
        visit_custom(&self.custom, f);
        for item in &self.line_items {
            visit_custom(&item.custom, f);
        }
        for item in &self.text_line_items {
            visit_custom(&item.custom, f);
        }
    }

    fn visit_references_mut(&mut self, f: &mut dyn FnMut(&mut Reference)) {
        visit_custom_mut(&mut self.custom, f);
        for item in &mut self.line_items {
            visit_custom_mut(&mut item.custom, f);
        }
        for item in &mut self.text_line_items {
            visit_custom_mut(&mut item.custom, f);
        }
    }
}
