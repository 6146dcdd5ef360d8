//! Category resources and their update-action set.

use crate::custom_fields::{CustomFields, FieldMap};
use crate::ids::{HasKey, Key, ResourceId};
use crate::product::Asset;
use crate::reference::Reference;
use serde::{Deserialize, Serialize};

/// An existing category fetched from the target project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: ResourceId,
    pub key: Key,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parent: Option<Reference>,
    #[serde(default)]
    pub order_hint: Option<String>,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub custom: Option<CustomFields>,
    #[serde(default)]
    pub assets: Vec<Asset>,
    pub version: u64,
}

impl HasKey for Category {
    fn key(&self) -> &Key {
        &self.key
    }
}

/// The desired state of a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDraft {
    pub key: Key,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parent: Option<Reference>,
    #[serde(default)]
    pub order_hint: Option<String>,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub custom: Option<CustomFields>,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

impl HasKey for CategoryDraft {
    fn key(&self) -> &Key {
        &self.key
    }
}

/// An atomic category mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum CategoryUpdateAction {
    ChangeName { name: String },
    ChangeSlug { slug: String },
    SetDescription { description: Option<String> },
    ChangeParent { parent: Reference },
    ChangeOrderHint { order_hint: Option<String> },
    SetMetaTitle { meta_title: Option<String> },
    SetMetaDescription { meta_description: Option<String> },
    SetCustomType {
        type_ref: Option<Reference>,
        fields: FieldMap,
    },
    SetCustomField {
        name: String,
        value: Option<serde_json::Value>,
    },
    RemoveAsset { asset_key: Key },
    ChangeAssetName { asset_key: Key, name: String },
    SetAssetSources { asset_key: Key, sources: Vec<String> },
    AddAsset { asset: Asset, position: Option<usize> },
    ChangeAssetOrder { asset_keys: Vec<Key> },
    SetAssetCustomType {
        asset_key: Key,
        type_ref: Option<Reference>,
        fields: FieldMap,
    },
    SetAssetCustomField {
        asset_key: Key,
        name: String,
        value: Option<serde_json::Value>,
    },
}
