//! Field-level error reporting during a diff.

use crate::error::DiffError;
use storesync_types::Key;

/// Receiver for recoverable field-level diff failures.
///
/// Both callbacks carry the key of the resource being diffed and the name
/// of the field where the problem surfaced. Implementations must not
/// assume they are called at most once per diff.
pub trait DiffHooks {
    /// A field diff was dropped.
    fn on_error(&mut self, _resource_key: &Key, _field: &str, _error: &DiffError) {}

    /// A field diff proceeded but something looked off.
    fn on_warning(&mut self, _resource_key: &Key, _field: &str, _message: &str) {}
}

/// Hooks that swallow every report.
pub struct NoopHooks;

impl DiffHooks for NoopHooks {}

/// Hooks that collect every report, for callers that want to inspect them
/// after the diff.
#[derive(Default)]
pub struct CollectingHooks {
    pub errors: Vec<(Key, String, DiffError)>,
    pub warnings: Vec<(Key, String, String)>,
}

impl DiffHooks for CollectingHooks {
    fn on_error(&mut self, resource_key: &Key, field: &str, error: &DiffError) {
        self.errors
            .push((resource_key.clone(), field.to_string(), error.clone()));
    }

    fn on_warning(&mut self, resource_key: &Key, field: &str, message: &str) {
        self.warnings
            .push((resource_key.clone(), field.to_string(), message.to_string()));
    }
}
