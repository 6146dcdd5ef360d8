//! Update-action diff engine.
//!
//! Given an existing resource and a resolved draft, each per-kind
//! `build_actions` entry point produces the ordered, minimal action list
//! that converges the existing state onto the draft. The ordering contract
//! is fixed: removals come before additions within a collection, a reorder
//! action comes after the additions it references, and a product's publish
//! action is always last. Field-level problems are reported through
//! [`DiffHooks`] and never abort the remainder of a diff.

pub mod attributes;
pub mod category;
pub mod common;
pub mod custom_fields;
pub mod error;
pub mod hooks;
pub mod images;
pub mod ordered;
pub mod prices;
pub mod product;
pub mod product_type;
pub mod shopping_list;

pub use common::build_update_action;
pub use custom_fields::{diff_custom_fields, CustomDiff};
pub use error::DiffError;
pub use hooks::{CollectingHooks, DiffHooks, NoopHooks};
pub use images::{diff_images, ImageDiff};
pub use ordered::{diff_ordered_keyed, OrderedDiff};
pub use prices::{diff_prices, PriceDiff};
