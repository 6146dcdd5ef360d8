//! Shared diff primitives.

/// Builds an action only when the two values differ.
pub fn build_update_action<T: PartialEq + ?Sized, A>(
    old: &T,
    new: &T,
    action: impl FnOnce() -> A,
) -> Option<A> {
    if old == new {
        None
    } else {
        Some(action())
    }
}
