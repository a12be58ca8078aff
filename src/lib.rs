//! # tagmap
//!
//! An in-memory open-addressing hash table with:
//! - String keys, owned and compared byte for byte
//! - Tagged values: integer, float or string
//! - Linear probing with tombstones for deletion
//! - Automatic doubling before the load factor reaches 0.75
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │              set / get / delete / iter                       │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                 Linear-Probe Traversal                       │
//! │        (Empty ends chain, Deleted is transparent)            │
//! └──────────┬──────────────────────────────────┬───────────────┘
//!            │                                  │
//!            ▼                                  ▼
//!   ┌─────────────────┐               ┌──────────────────┐
//!   │  FNV-1a Hash    │               │  Grow / Compact  │
//!   │ (start bucket)  │               │  (rebuild slots) │
//!   └─────────────────┘               └────────┬─────────┘
//!                                              │
//!                                              ▼
//!                                     ┌──────────────────┐
//!                                     │   Slot Storage   │
//!                                     │  (Box<[Slot]>)   │
//!                                     └──────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use tagmap::{HashTable, Value};
//!
//! let mut table = HashTable::new(4)?;
//! table.set("a", 1)?;
//! table.set("b", 2.5)?;
//! table.set("c", "three")?;
//!
//! assert_eq!(table.capacity(), 8);
//! assert_eq!(table.get("c").map(|e| e.value().clone()), Some(Value::from("three")));
//! # Ok::<(), tagmap::TableError>(())
//! ```
//!
//! Not thread-safe by itself: mutation takes `&mut self`, so sharing a table
//! across threads needs a lock supplied by the caller.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod hash;
pub mod table;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{TableError, Result};
pub use config::Config;
pub use table::{EntryView, HashTable, Iter, SlotState, TableHandle, TableStats, Value, ValueType};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of tagmap
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
