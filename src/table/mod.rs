//! Table Module
//!
//! The open-addressing hash table and its supporting types.
//!
//! ## Responsibilities
//! - Own slot storage and every key/value payload stored in it
//! - Insert-or-update, lookup and delete over one linear-probe traversal
//! - Grow before the load factor reaches 0.75, dropping tombstones on rebuild
//! - Read-only iteration in storage order for display and inspection
//!
//! ## Slot Lifecycle
//! ```text
//!   Empty ──set──▶ Occupied ──delete──▶ Deleted ──set──▶ Occupied ...
//!                                          │
//!                                          └──rebuild──▶ (dropped)
//! ```

mod dump;
mod handle;
mod iter;
mod map;
mod slot;
mod value;

pub use handle::TableHandle;
pub use iter::Iter;
pub use map::{HashTable, TableStats};
pub use slot::SlotState;
pub use value::{Value, ValueType};

use slot::Entry;

/// Read-only view of an occupied slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryView<'a> {
    slot: usize,
    key: &'a str,
    value: &'a Value,
}

impl<'a> EntryView<'a> {
    pub(crate) fn new(slot: usize, entry: &'a Entry) -> Self {
        Self {
            slot,
            key: &entry.key,
            value: &entry.value,
        }
    }

    /// Index of the slot holding this entry
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Stored key (after any configured truncation)
    pub fn key(&self) -> &'a str {
        self.key
    }

    pub fn value(&self) -> &'a Value {
        self.value
    }

    pub fn value_type(&self) -> ValueType {
        self.value.value_type()
    }
}
