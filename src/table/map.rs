//! HashTable implementation
//!
//! Open addressing with linear probing over a boxed slice of slots.
//!
//! ## Probing
//! Every operation starts at `fnv1a(key) % capacity` and walks
//! `index, index + 1, ...` modulo capacity, for at most `capacity` probes.
//! - `Empty` ends every chain: nothing past it can belong to the key.
//! - `Deleted` is skipped by lookup and delete, and remembered by insert so
//!   the first tombstone on the chain is reused once the key is known absent.
//! - `Occupied` matches only on full key equality, never on hash equality.
//!
//! ## Growth
//! Before an insert of a new key, if `size + 1` would reach `floor(capacity * 0.75)` the
//! table doubles. New storage is allocated first; the old storage is only
//! dismantled once that succeeded, so a failed growth changes nothing.
//! Rebuilding drops every tombstone. Overwrites of a present key never grow.

use std::mem;

use tracing::{debug, error, trace};

use crate::config::Config;
use crate::error::{Result, TableError};
use crate::hash::bucket_index;

use super::slot::{self, Entry, Slot, SlotState};
use super::{EntryView, Iter, Value};

/// `floor(capacity * 0.75)` without overflowing on large capacities
#[inline]
pub(crate) fn max_load(capacity: usize) -> usize {
    capacity / 4 * 3 + capacity % 4 * 3 / 4
}

/// Point-in-time counters of a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableStats {
    /// Number of slots
    pub capacity: usize,
    /// Occupied slots
    pub size: usize,
    /// Deleted slots awaiting reuse or compaction
    pub tombstones: usize,
    /// Largest `size` the current capacity admits
    pub max_load: usize,
}

/// Open-addressing hash table from string keys to tagged values
#[derive(Debug, Clone)]
pub struct HashTable {
    /// Settings fixed at init
    config: Config,

    /// Slot storage, `capacity` long
    slots: Box<[Slot]>,

    /// Occupied slot count
    size: usize,

    /// Deleted slot count
    tombstones: usize,
}

impl HashTable {
    const GROWTH_FACTOR: usize = 2;

    /// Create a table with `capacity` slots (0 selects the default of 64)
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_config(Config::builder().initial_capacity(capacity).build())
    }

    /// Create a table from a full config
    pub fn with_config(config: Config) -> Result<Self> {
        let capacity = config.effective_capacity();
        let slots = slot::allocate(capacity)
            .map_err(|_| TableError::AllocationFailure { requested: capacity })?;

        debug!(capacity, max_key_len = ?config.max_key_len, "initialized table");

        Ok(Self {
            config,
            slots,
            size: 0,
            tombstones: 0,
        })
    }

    // =========================================================================
    // Mutators / Accessors
    // =========================================================================

    /// Insert `value` under `key`, or overwrite the value already there
    ///
    /// Returns the previous value on overwrite. The table keeps its own copy
    /// of the key and owns the value from here on.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<Option<Value>> {
        let key = self.normalize_key(key);
        if key.is_empty() {
            return Err(TableError::InvalidKey);
        }
        let value = value.into();

        // Overwrites never change size, so they must not trigger growth
        if let Some(index) = self.find(key) {
            if let Slot::Occupied(entry) = &mut self.slots[index] {
                let previous = mem::replace(&mut entry.value, value);
                trace!(key, slot = index, "overwrote value");
                return Ok(Some(previous));
            }
        }

        self.reserve_one()?;

        let capacity = self.capacity();
        let start = bucket_index(key, capacity);
        let mut reusable = None;

        for offset in 0..capacity {
            let index = (start + offset) % capacity;
            // The key is known absent here, so occupied slots are only skipped
            match &self.slots[index] {
                Slot::Occupied(_) => {}
                Slot::Deleted => {
                    reusable.get_or_insert(index);
                }
                Slot::Empty => {
                    self.claim(reusable.unwrap_or(index), key, value);
                    return Ok(None);
                }
            }
        }

        // Full cycle without an Empty slot: only a tombstone can take the key
        if let Some(index) = reusable {
            self.claim(index, key, value);
            return Ok(None);
        }

        error!(key, capacity, size = self.size, "probe cycle exhausted on insert");
        Err(TableError::TableFull { capacity })
    }

    /// Look up `key`
    pub fn get(&self, key: &str) -> Option<EntryView<'_>> {
        let key = self.normalize_key(key);
        let index = self.find(key)?;
        match &self.slots[index] {
            Slot::Occupied(entry) => Some(EntryView::new(index, entry)),
            _ => None,
        }
    }

    /// Return `true` if the table holds a value for `key`
    pub fn contains_key(&self, key: &str) -> bool {
        self.find(self.normalize_key(key)).is_some()
    }

    /// Remove `key`, leaving a tombstone in its slot
    ///
    /// The removed value is handed back to the caller.
    pub fn delete(&mut self, key: &str) -> Result<Value> {
        let key = self.normalize_key(key);
        let index = self.find(key).ok_or(TableError::NotFound)?;

        match mem::replace(&mut self.slots[index], Slot::Deleted) {
            Slot::Occupied(entry) => {
                self.size -= 1;
                self.tombstones += 1;
                trace!(key, slot = index, "deleted entry");
                Ok(entry.value)
            }
            other => {
                self.slots[index] = other;
                Err(TableError::NotFound)
            }
        }
    }

    /// Iterate occupied slots in storage order
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.slots)
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of slots
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of deleted slots not yet reused or compacted away
    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    /// `size / capacity`
    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.capacity() as f64
    }

    /// State of the slot at `index`, if in range
    pub fn slot_state(&self, index: usize) -> Option<SlotState> {
        self.slots.get(index).map(Slot::state)
    }

    pub fn stats(&self) -> TableStats {
        TableStats {
            capacity: self.capacity(),
            size: self.size,
            tombstones: self.tombstones,
            max_load: max_load(self.capacity()),
        }
    }

    /// Settings the table was built with
    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Apply the configured key length limit
    ///
    /// Cuts at the last char boundary at or below `max_key_len` bytes, so the
    /// same input is always truncated the same way.
    fn normalize_key<'k>(&self, key: &'k str) -> &'k str {
        match self.config.max_key_len {
            Some(max) if key.len() > max => {
                let mut end = max;
                while !key.is_char_boundary(end) {
                    end -= 1;
                }
                &key[..end]
            }
            _ => key,
        }
    }

    /// Shared lookup traversal: index of the occupied slot holding `key`
    fn find(&self, key: &str) -> Option<usize> {
        if key.is_empty() {
            return None;
        }

        let capacity = self.capacity();
        let start = bucket_index(key, capacity);

        for offset in 0..capacity {
            let index = (start + offset) % capacity;
            match &self.slots[index] {
                Slot::Empty => return None,
                Slot::Occupied(entry) if &*entry.key == key => return Some(index),
                _ => {}
            }
        }

        None
    }

    /// Write a fresh entry into an Empty or Deleted slot
    fn claim(&mut self, index: usize, key: &str, value: Value) {
        if matches!(self.slots[index], Slot::Deleted) {
            self.tombstones -= 1;
        }
        self.slots[index] = Slot::Occupied(Entry {
            key: key.into(),
            value,
        });
        self.size += 1;
        trace!(key, slot = index, size = self.size, "claimed slot");
    }

    /// Make room for one more entry: grow, or compact tombstones in place
    fn reserve_one(&mut self) -> Result<()> {
        let capacity = self.capacity();

        if self.size + 1 >= max_load(capacity) {
            let mut target = capacity;
            while self.size + 1 >= max_load(target) {
                target = target
                    .checked_mul(Self::GROWTH_FACTOR)
                    .ok_or(TableError::AllocationFailure { requested: usize::MAX })?;
            }
            return self.rebuild(target);
        }

        if self.config.compact_tombstones
            && self.tombstones > 0
            && self.size + self.tombstones + 1 >= max_load(capacity)
        {
            return self.rebuild(capacity);
        }

        Ok(())
    }

    /// Move every occupied entry into fresh storage of `new_capacity` slots
    fn rebuild(&mut self, new_capacity: usize) -> Result<()> {
        let fresh = slot::allocate(new_capacity)
            .map_err(|_| TableError::AllocationFailure { requested: new_capacity })?;

        let old_capacity = self.capacity();
        let dropped = mem::replace(&mut self.tombstones, 0);
        let old = mem::replace(&mut self.slots, fresh);

        for slot in old.into_vec() {
            if let Slot::Occupied(entry) = slot {
                self.place(entry);
            }
        }

        if new_capacity > old_capacity {
            debug!(old_capacity, new_capacity, entries = self.size, tombstones = dropped, "grew table");
        } else {
            debug!(capacity = new_capacity, entries = self.size, tombstones = dropped, "compacted table");
        }

        Ok(())
    }

    /// Insert into storage known to hold no tombstones and no copy of the key
    fn place(&mut self, entry: Entry) {
        let capacity = self.capacity();
        let mut index = bucket_index(&entry.key, capacity);
        while !matches!(self.slots[index], Slot::Empty) {
            index = (index + 1) % capacity;
        }
        self.slots[index] = Slot::Occupied(entry);
    }
}

impl<'a> IntoIterator for &'a HashTable {
    type Item = EntryView<'a>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
