//! Batched sync orchestration for storesync.
//!
//! The [`SyncEngine`] drives the full reconciliation pipeline for one
//! resource kind: validate draft keys, resolve references through the
//! shared cache, fetch the matching existing resources in one call, then
//! create or update each item concurrently within the batch. Hosts plug in
//! their transport through [`FetchService`] and [`ApplyService`] and pick
//! the kind through a [`ResourceStrategy`]. Failures are per item: they are
//! routed to the error callback and counted, never raised out of `sync`.

pub mod engine;
pub mod error;
pub mod options;
pub mod services;
pub mod statistics;
pub mod strategy;

pub use engine::SyncEngine;
pub use error::{SyncError, SyncResult};
pub use options::{BeforeCreate, BeforeUpdate, ErrorCallback, SyncOptions, WarningCallback};
pub use services::{ApplyError, ApplyService, FetchService, ServiceError};
pub use statistics::{SyncReport, SyncStatistics};
pub use strategy::{
    CategoryStrategy, ProductStrategy, ProductTypeStrategy, ResourceStrategy,
    ShoppingListStrategy,
};
