//! Specialized collection types

pub use slotmap::{new_key_type, SlotMap};

/// Handle-based map using slot map for stable references
///
/// Removing an element invalidates its handle without disturbing any other
/// handle, so registries can hold handles into a map they do not own.
pub type HandleMap<K, T> = SlotMap<K, T>;
