//! Marker trait for store state.

/// States are cloned out of their store for reading, compared to detect
/// changes, and start from `Default`.
pub trait StoreState: Clone + PartialEq + Default + Send + Sync + 'static {}
