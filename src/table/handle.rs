//! Bind-once table handle
//!
//! Mirrors the init/teardown lifecycle: a handle starts unbound, is bound to
//! storage exactly once by `init`, and releases it on `teardown`. Binding an
//! already bound handle is refused instead of leaking the first table.

use tracing::debug;

use crate::config::Config;
use crate::error::{Result, TableError};

use super::{EntryView, HashTable, Value};

/// Owner slot for at most one [`HashTable`]
#[derive(Debug, Default)]
pub struct TableHandle {
    table: Option<HashTable>,
}

impl TableHandle {
    /// Create a handle with no storage
    pub const fn unbound() -> Self {
        Self { table: None }
    }

    pub fn is_bound(&self) -> bool {
        self.table.is_some()
    }

    /// Bind the handle to a new table of `capacity` slots (0 selects 64)
    pub fn init(&mut self, capacity: usize) -> Result<&mut HashTable> {
        self.init_with_config(Config::builder().initial_capacity(capacity).build())
    }

    /// Bind the handle to a new table built from `config`
    pub fn init_with_config(&mut self, config: Config) -> Result<&mut HashTable> {
        if self.table.is_some() {
            return Err(TableError::AlreadyInitialized);
        }

        let table = HashTable::with_config(config)?;
        Ok(self.table.insert(table))
    }

    /// Release the storage and every payload in it
    ///
    /// Returns `false` when the handle was already unbound.
    pub fn teardown(&mut self) -> bool {
        match self.table.take() {
            Some(table) => {
                debug!(capacity = table.capacity(), entries = table.len(), "tore down table");
                true
            }
            None => false,
        }
    }

    pub fn table(&self) -> Result<&HashTable> {
        self.table.as_ref().ok_or(TableError::NotInitialized)
    }

    pub fn table_mut(&mut self) -> Result<&mut HashTable> {
        self.table.as_mut().ok_or(TableError::NotInitialized)
    }

    // =========================================================================
    // Forwarding Operations
    // =========================================================================

    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<Option<Value>> {
        self.table_mut()?.set(key, value)
    }

    pub fn get(&self, key: &str) -> Result<Option<EntryView<'_>>> {
        Ok(self.table()?.get(key))
    }

    pub fn delete(&mut self, key: &str) -> Result<Value> {
        self.table_mut()?.delete(key)
    }
}
