//! Slot storage
//!
//! A slot is exactly one of `Empty`, `Occupied` or `Deleted`. Storage is a
//! boxed slice allocated once per capacity, so slot access is O(1).

use std::collections::TryReserveError;

use super::Value;

/// Occupancy state of a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Empty,
    Occupied,
    Deleted,
}

/// Key/value pair held by an occupied slot
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Entry {
    pub(crate) key: Box<str>,
    pub(crate) value: Value,
}

/// One bucket of the table
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) enum Slot {
    /// Never used since the storage was built; terminates every probe chain
    #[default]
    Empty,
    Occupied(Entry),
    /// Tombstone: reusable by insert, transparent to lookup
    Deleted,
}

impl Slot {
    pub(crate) fn state(&self) -> SlotState {
        match self {
            Slot::Empty => SlotState::Empty,
            Slot::Occupied(_) => SlotState::Occupied,
            Slot::Deleted => SlotState::Deleted,
        }
    }
}

/// Allocate `capacity` empty slots without aborting on allocator refusal
pub(crate) fn allocate(capacity: usize) -> Result<Box<[Slot]>, TryReserveError> {
    let mut slots = Vec::new();
    slots.try_reserve_exact(capacity)?;
    slots.resize_with(capacity, Slot::default);
    Ok(slots.into_boxed_slice())
}
