//! Product resources: variants, prices, images, assets, and the product
//! update-action set.

use crate::attributes::{Attribute, AttributeValue};
use crate::custom_fields::{CustomFields, FieldMap};
use crate::ids::{HasKey, Key, ResourceId};
use crate::reference::Reference;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One price tier: a discounted amount from a minimum quantity upwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceTier {
    pub minimum_quantity: u32,
    pub cent_amount: i64,
}

/// The monetary value of a price, including its tiers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceValue {
    pub cent_amount: i64,
    #[serde(default)]
    pub tiers: Vec<PriceTier>,
}

/// The composite identity of a price within a variant.
///
/// Two prices are "the same price" when all six scope components match;
/// everything else about them is diffable content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceCompositeId {
    pub currency: String,
    pub country: Option<String>,
    pub channel_key: Option<Key>,
    pub customer_group_key: Option<Key>,
    pub valid_from: Option<String>,
    pub valid_until: Option<String>,
}

/// A scoped price on a product variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub currency: String,
    #[serde(default)]
    pub country: Option<String>,
    /// Distribution channel scope.
    #[serde(default)]
    pub channel: Option<Reference>,
    /// Customer group scope.
    #[serde(default)]
    pub customer_group: Option<Reference>,
    #[serde(default)]
    pub valid_from: Option<String>,
    #[serde(default)]
    pub valid_until: Option<String>,
    pub value: PriceValue,
    #[serde(default)]
    pub custom: Option<CustomFields>,
}

impl Price {
    /// Returns the composite identity of this price. Unresolved channel or
    /// customer-group references contribute their raw id string, so that two
    /// prices only ever match when both sides are in the same resolution
    /// state.
    #[must_use]
    pub fn composite_id(&self) -> PriceCompositeId {
        fn scope_key(reference: &Option<Reference>) -> Option<Key> {
            reference.as_ref().map(|r| match r.resolved_key() {
                Some(key) => key.clone(),
                None => Key::new(r.id().map(|id| id.as_str()).unwrap_or_default()),
            })
        }

        PriceCompositeId {
            currency: self.currency.clone(),
            country: self.country.clone(),
            channel_key: scope_key(&self.channel),
            customer_group_key: scope_key(&self.customer_group),
            valid_from: self.valid_from.clone(),
            valid_until: self.valid_until.clone(),
        }
    }
}

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDimensions {
    pub w: u32,
    pub h: u32,
}

/// An external image on a product variant. Image lists are ordered; order
/// differences are reconciled with move-to-position actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub dimensions: Option<ImageDimensions>,
}

/// A keyed media asset on a variant or category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub key: Key,
    pub name: String,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub custom: Option<CustomFields>,
}

impl HasKey for Asset {
    fn key(&self) -> &Key {
        &self.key
    }
}

/// A product variant. The same shape serves as existing state and as draft
/// state; variants are matched across the two by key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub key: Key,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub prices: Vec<Price>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl HasKey for ProductVariant {
    fn key(&self) -> &Key {
        &self.key
    }
}

/// An existing product fetched from the target project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ResourceId,
    pub key: Key,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub tax_category: Option<Reference>,
    #[serde(default)]
    pub categories: Vec<Reference>,
    /// Category key to order hint.
    #[serde(default)]
    pub category_order_hints: BTreeMap<String, String>,
    pub master_variant_key: Key,
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
    pub published: bool,
    #[serde(default)]
    pub has_staged_changes: bool,
    pub version: u64,
}

impl HasKey for Product {
    fn key(&self) -> &Key {
        &self.key
    }
}

impl Product {
    /// Returns the variant with the given key, if present.
    #[must_use]
    pub fn variant_by_key(&self, key: &Key) -> Option<&ProductVariant> {
        self.variants.iter().find(|v| &v.key == key)
    }

    /// Returns the master variant, if its key matches a variant.
    #[must_use]
    pub fn master_variant(&self) -> Option<&ProductVariant> {
        self.variant_by_key(&self.master_variant_key)
    }
}

/// The desired state of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub key: Key,
    pub product_type: Reference,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub tax_category: Option<Reference>,
    #[serde(default)]
    pub categories: Vec<Reference>,
    #[serde(default)]
    pub category_order_hints: BTreeMap<String, String>,
    pub master_variant_key: Key,
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
    /// Request publication after a successful apply.
    #[serde(default)]
    pub publish: bool,
}

impl HasKey for ProductDraft {
    fn key(&self) -> &Key {
        &self.key
    }
}

impl ProductDraft {
    /// Returns the variant with the given key, if present.
    #[must_use]
    pub fn variant_by_key(&self, key: &Key) -> Option<&ProductVariant> {
        self.variants.iter().find(|v| &v.key == key)
    }

    /// Returns the master variant, if its key matches a variant.
    #[must_use]
    pub fn master_variant(&self) -> Option<&ProductVariant> {
        self.variant_by_key(&self.master_variant_key)
    }
}

/// An atomic product mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ProductUpdateAction {
    ChangeName { name: String },
    ChangeSlug { slug: String },
    SetDescription { description: Option<String> },
    SetMetaTitle { meta_title: Option<String> },
    SetMetaDescription { meta_description: Option<String> },
    SetTaxCategory { tax_category: Option<Reference> },
    AddToCategory { category: Reference },
    SetCategoryOrderHint { category_key: String, order_hint: Option<String> },
    RemoveFromCategory { category: Reference },
    RemoveVariant { variant_key: Key },
    AddVariant { variant: ProductVariant, position: Option<usize> },
    ChangeMasterVariant { variant_key: Key },
    SetSku { variant_key: Key, sku: Option<String> },
    RemovePrice { variant_key: Key, price_id: PriceCompositeId },
    ChangePrice { variant_key: Key, price_id: PriceCompositeId, value: PriceValue },
    AddPrice { variant_key: Key, price: Price },
    SetPriceCustomType {
        variant_key: Key,
        price_id: PriceCompositeId,
        type_ref: Option<Reference>,
        fields: FieldMap,
    },
    SetPriceCustomField {
        variant_key: Key,
        price_id: PriceCompositeId,
        name: String,
        value: Option<serde_json::Value>,
    },
    RemoveImage { variant_key: Key, url: String },
    AddExternalImage { variant_key: Key, image: Image },
    MoveImageToPosition { variant_key: Key, url: String, position: usize },
    RemoveAsset { variant_key: Key, asset_key: Key },
    ChangeAssetName { variant_key: Key, asset_key: Key, name: String },
    SetAssetSources { variant_key: Key, asset_key: Key, sources: Vec<String> },
    AddAsset { variant_key: Key, asset: Asset, position: Option<usize> },
    ChangeAssetOrder { variant_key: Key, asset_keys: Vec<Key> },
    SetAssetCustomType {
        variant_key: Key,
        asset_key: Key,
        type_ref: Option<Reference>,
        fields: FieldMap,
    },
    SetAssetCustomField {
        variant_key: Key,
        asset_key: Key,
        name: String,
        value: Option<serde_json::Value>,
    },
    SetAttribute {
        variant_key: Key,
        name: String,
        value: Option<AttributeValue>,
    },
    SetAttributeInAllVariants {
        name: String,
        value: Option<AttributeValue>,
    },
    Publish,
}
