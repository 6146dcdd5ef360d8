//! Reference resolution for storesync draft batches.
//!
//! Drafts arrive carrying id-based references copied from a source project.
//! Before diffing they must be rewritten to portable key-based references.
//! This crate walks each draft's references, batches the unknown ids into
//! one lookup per resource kind, and substitutes keys in place, backed by
//! the shared bounded cache from `storesync-cache`.

pub mod error;
pub mod lookup;
pub mod references;
pub mod resolver;

pub use error::{LookupError, ResolveError};
pub use lookup::KeyLookup;
pub use references::HasReferences;
pub use resolver::ReferenceResolver;
