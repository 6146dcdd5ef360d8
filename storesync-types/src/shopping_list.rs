//! Shopping list resources: line items, text line items, and the shopping
//! list update-action set.

use crate::custom_fields::{CustomFields, FieldMap};
use crate::ids::{HasKey, Key, ResourceId};
use crate::reference::Reference;
use serde::{Deserialize, Serialize};

/// An existing line item on a shopping list. Line items are matched against
/// drafts by sku.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: ResourceId,
    pub sku: String,
    pub quantity: u64,
    #[serde(default)]
    pub custom: Option<CustomFields>,
}

/// The desired state of a line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemDraft {
    pub sku: String,
    /// Defaults to 1 when absent.
    #[serde(default)]
    pub quantity: Option<u64>,
    #[serde(default)]
    pub custom: Option<CustomFields>,
}

impl LineItemDraft {
    /// Returns the effective quantity, applying the default of 1.
    #[must_use]
    pub fn effective_quantity(&self) -> u64 {
        self.quantity.unwrap_or(1)
    }
}

/// An existing free-text line on a shopping list. Text line items carry no
/// sku and are matched by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextLineItem {
    pub id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub quantity: u64,
    #[serde(default)]
    pub custom: Option<CustomFields>,
}

/// The desired state of a text line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextLineItemDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub quantity: Option<u64>,
    #[serde(default)]
    pub custom: Option<CustomFields>,
}

impl TextLineItemDraft {
    /// Returns the effective quantity, applying the default of 1.
    #[must_use]
    pub fn effective_quantity(&self) -> u64 {
        self.quantity.unwrap_or(1)
    }
}

/// An existing shopping list fetched from the target project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingList {
    pub id: ResourceId,
    pub key: Key,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub delete_days_after_last_modification: Option<u32>,
    #[serde(default)]
    pub custom: Option<CustomFields>,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    #[serde(default)]
    pub text_line_items: Vec<TextLineItem>,
    pub version: u64,
}

impl HasKey for ShoppingList {
    fn key(&self) -> &Key {
        &self.key
    }
}

/// The desired state of a shopping list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListDraft {
    pub key: Key,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub delete_days_after_last_modification: Option<u32>,
    #[serde(default)]
    pub custom: Option<CustomFields>,
    #[serde(default)]
    pub line_items: Vec<LineItemDraft>,
    #[serde(default)]
    pub text_line_items: Vec<TextLineItemDraft>,
}

impl HasKey for ShoppingListDraft {
    fn key(&self) -> &Key {
        &self.key
    }
}

/// An atomic shopping-list mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ShoppingListUpdateAction {
    ChangeName { name: String },
    SetSlug { slug: Option<String> },
    SetDescription { description: Option<String> },
    SetDeleteDaysAfterLastModification { days: Option<u32> },
    SetCustomType {
        type_ref: Option<Reference>,
        fields: FieldMap,
    },
    SetCustomField {
        name: String,
        value: Option<serde_json::Value>,
    },
    RemoveLineItem { line_item_id: ResourceId },
    ChangeLineItemQuantity { line_item_id: ResourceId, quantity: u64 },
    SetLineItemCustomType {
        line_item_id: ResourceId,
        type_ref: Option<Reference>,
        fields: FieldMap,
    },
    SetLineItemCustomField {
        line_item_id: ResourceId,
        name: String,
        value: Option<serde_json::Value>,
    },
    AddLineItem { draft: LineItemDraft },
    ChangeLineItemsOrder { skus: Vec<String> },
    RemoveTextLineItem { text_line_item_id: ResourceId },
    ChangeTextLineItemQuantity {
        text_line_item_id: ResourceId,
        quantity: u64,
    },
    SetTextLineItemDescription {
        text_line_item_id: ResourceId,
        description: Option<String>,
    },
    SetTextLineItemCustomType {
        text_line_item_id: ResourceId,
        type_ref: Option<Reference>,
        fields: FieldMap,
    },
    SetTextLineItemCustomField {
        text_line_item_id: ResourceId,
        name: String,
        value: Option<serde_json::Value>,
    },
    AddTextLineItem { draft: TextLineItemDraft },
    ChangeTextLineItemsOrder { names: Vec<String> },
}
