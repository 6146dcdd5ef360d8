//! Product type resources: attribute definitions, enum value sets, and the
//! product-type update-action set.

use crate::ids::{HasKey, Key, ResourceId, ResourceKind};
use crate::reference::Reference;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A plain enum value of an enum-typed attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    pub key: String,
    pub label: String,
}

impl EnumValue {
    /// Creates an enum value.
    #[must_use]
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// A localized enum value: one key, one label per locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedEnumValue {
    pub key: String,
    /// Locale tag to label.
    pub label: BTreeMap<String, String>,
}

/// The value shape an attribute definition accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "camelCase")]
pub enum AttributeTypeDef {
    Text,
    Number,
    Boolean,
    Money,
    Date,
    Enum { values: Vec<EnumValue> },
    LocalizedEnum { values: Vec<LocalizedEnumValue> },
    Reference { kind: ResourceKind },
    Nested { type_ref: Reference },
    Set { element: Box<AttributeTypeDef> },
}

/// One attribute definition on a product type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDefinition {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub input_tip: Option<String>,
    #[serde(default)]
    pub is_required: bool,
    #[serde(rename = "type")]
    pub attribute_type: AttributeTypeDef,
}

impl AttributeDefinition {
    /// Returns the enum values of this definition, descending through set
    /// wrappers, or `None` for non-enum definitions.
    #[must_use]
    pub fn enum_values(&self) -> Option<&[EnumValue]> {
        let mut ty = &self.attribute_type;
        loop {
            match ty {
                AttributeTypeDef::Enum { values } => return Some(values),
                AttributeTypeDef::Set { element } => ty = element,
                _ => return None,
            }
        }
    }

    /// Returns the localized enum values of this definition, descending
    /// through set wrappers, or `None` for other definitions.
    #[must_use]
    pub fn localized_enum_values(&self) -> Option<&[LocalizedEnumValue]> {
        let mut ty = &self.attribute_type;
        loop {
            match ty {
                AttributeTypeDef::LocalizedEnum { values } => return Some(values),
                AttributeTypeDef::Set { element } => ty = element,
                _ => return None,
            }
        }
    }
}

/// An existing product type fetched from the target project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductType {
    pub id: ResourceId,
    pub key: Key,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub attributes: Vec<AttributeDefinition>,
    pub version: u64,
}

impl HasKey for ProductType {
    fn key(&self) -> &Key {
        &self.key
    }
}

/// The desired state of a product type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductTypeDraft {
    pub key: Key,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub attributes: Vec<AttributeDefinition>,
}

impl HasKey for ProductTypeDraft {
    fn key(&self) -> &Key {
        &self.key
    }
}

/// An atomic product-type mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ProductTypeUpdateAction {
    ChangeName { name: String },
    ChangeDescription { description: Option<String> },
    RemoveAttributeDefinition { name: String },
    ChangeAttributeDefinitionLabel { attribute_name: String, label: String },
    SetInputTip { attribute_name: String, input_tip: Option<String> },
    AddAttributeDefinition { definition: AttributeDefinition },
    ChangeAttributeOrder { attribute_names: Vec<String> },
    RemoveEnumValues { attribute_name: String, keys: Vec<String> },
    ChangePlainEnumValueLabel { attribute_name: String, value: EnumValue },
    AddPlainEnumValue { attribute_name: String, value: EnumValue },
    ChangePlainEnumValueOrder { attribute_name: String, keys: Vec<String> },
    ChangeLocalizedEnumValueLabel {
        attribute_name: String,
        value: LocalizedEnumValue,
    },
    AddLocalizedEnumValue {
        attribute_name: String,
        value: LocalizedEnumValue,
    },
    ChangeLocalizedEnumValueOrder { attribute_name: String, keys: Vec<String> },
}
