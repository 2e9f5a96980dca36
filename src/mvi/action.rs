//! Marker trait for store actions.

/// Actions describe a single state transition.
///
/// They are produced by sync operations (API results, loading flags) and
/// consumed by a [`Reducer`](super::Reducer).
pub trait Action: Send + 'static {}
