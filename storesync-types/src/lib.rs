//! Core domain types for the storesync reconciliation engine.
//!
//! This crate defines the resource model shared by every other storesync
//! crate: portable identifiers, cross-resource references, the four synced
//! resource kinds with their draft counterparts, and the per-kind update
//! action enums the diff engine emits.

pub mod attributes;
pub mod category;
pub mod custom_fields;
pub mod ids;
pub mod product;
pub mod product_type;
pub mod reference;
pub mod shopping_list;

pub use attributes::{Attribute, AttributeMetaData, AttributeValue};
pub use category::{Category, CategoryDraft, CategoryUpdateAction};
pub use custom_fields::{CustomFields, FieldMap};
pub use ids::{HasKey, Key, ResourceId, ResourceKind, KEY_IS_NOT_SET};
pub use product::{
    Asset, Image, ImageDimensions, Price, PriceCompositeId, PriceTier, PriceValue, Product,
    ProductDraft, ProductUpdateAction, ProductVariant,
};
pub use product_type::{
    AttributeDefinition, AttributeTypeDef, EnumValue, LocalizedEnumValue, ProductType,
    ProductTypeDraft, ProductTypeUpdateAction,
};
pub use reference::{Reference, ReferenceTarget};
pub use shopping_list::{
    LineItem, LineItemDraft, ShoppingList, ShoppingListDraft, ShoppingListUpdateAction,
    TextLineItem, TextLineItemDraft,
};
