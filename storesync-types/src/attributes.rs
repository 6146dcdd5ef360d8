//! Attribute value shapes.
//!
//! Product variant attributes can hold scalars, references, sets of any of
//! these (arbitrarily deep), or nested attribute containers. The shape is a
//! recursive sum type so the resolver can walk it by structural recursion
//! instead of chained downcasts.

use crate::reference::Reference;
use serde::{Deserialize, Serialize};

/// The value of a variant attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttributeValue {
    /// Plain JSON scalar (text, number, boolean, enum key, ...).
    Scalar(serde_json::Value),
    /// Reference to another resource.
    Reference(Reference),
    /// Ordered collection of inner values; may nest further collections.
    Set(Vec<AttributeValue>),
    /// Nested attribute container (value of a nested-type attribute).
    Nested(Vec<Attribute>),
}

impl AttributeValue {
    /// Calls `f` for every reference embedded in this value, recursively.
    pub fn for_each_reference<F: FnMut(&Reference)>(&self, f: &mut F) {
        match self {
            Self::Scalar(_) => {}
            Self::Reference(reference) => f(reference),
            Self::Set(values) => {
                for value in values {
                    value.for_each_reference(f);
                }
            }
            Self::Nested(attributes) => {
                for attribute in attributes {
                    attribute.value.for_each_reference(f);
                }
            }
        }
    }

    /// Calls `f` for every reference embedded in this value, mutably.
    pub fn for_each_reference_mut<F: FnMut(&mut Reference)>(&mut self, f: &mut F) {
        match self {
            Self::Scalar(_) => {}
            Self::Reference(reference) => f(reference),
            Self::Set(values) => {
                for value in values {
                    value.for_each_reference_mut(f);
                }
            }
            Self::Nested(attributes) => {
                for attribute in attributes {
                    attribute.value.for_each_reference_mut(f);
                }
            }
        }
    }
}

/// A named attribute on a product variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: AttributeValue,
}

impl Attribute {
    /// Creates a named attribute.
    #[must_use]
    pub fn new(name: impl Into<String>, value: AttributeValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Caller-supplied metadata for one attribute definition.
///
/// `same_for_all` marks an attribute whose value is constrained to be
/// identical across every variant of a product; such attributes are diffed
/// once at product level and updated with a single apply-to-all action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeMetaData {
    pub name: String,
    pub same_for_all: bool,
}

impl AttributeMetaData {
    /// Metadata for a regular per-variant attribute.
    #[must_use]
    pub fn per_variant(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            same_for_all: false,
        }
    }

    /// Metadata for a shared ("same for all variants") attribute.
    #[must_use]
    pub fn same_for_all(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            same_for_all: true,
        }
    }
}
