//! Error types for the diff engine.
//!
//! Diff errors are recoverable at field granularity: they are reported
//! through [`crate::hooks::DiffHooks`], the offending action is dropped,
//! and the rest of the diff proceeds.

use thiserror::Error;

/// A field-level diff failure.
#[derive(Debug, Clone, Error)]
pub enum DiffError {
    /// Neither side of a custom-field comparison carries a type id, so a
    /// per-field diff would have no backing type to scope it.
    #[error("custom type ids are not set for both the old and new {resource}")]
    CustomTypeIdsUnset { resource: String },

    /// One side of a custom-field comparison has a blank type id while the
    /// other carries fields.
    #[error("custom type id is blank on one side of the {resource} comparison")]
    BlankCustomTypeId { resource: String },

    /// A draft attribute has no entry in the caller-supplied metadata, so
    /// its sharing constraint is unknown.
    #[error("no attribute metadata for '{name}' on {resource}")]
    UnknownAttribute { resource: String, name: String },

    /// Two items of a keyed collection share one key; only the first is
    /// diffed.
    #[error("duplicate key '{key}' in {collection} of {resource}")]
    DuplicateKey {
        resource: String,
        collection: String,
        key: String,
    },
}
