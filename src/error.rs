//! Error types for tagmap
//!
//! Provides a unified error type for all table operations.

use thiserror::Error;

/// Result type alias using TableError
pub type Result<T> = std::result::Result<T, TableError>;

/// Unified error type for tagmap operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TableError {
    // -------------------------------------------------------------------------
    // Storage Errors
    // -------------------------------------------------------------------------
    /// Backing storage for `requested` slots could not be obtained.
    /// Raised by init and growth; a failed growth leaves the table untouched.
    #[error("Allocation failed: could not reserve {requested} slots")]
    AllocationFailure { requested: usize },

    /// Probe cycle exhausted without placing the entry.
    ///
    /// Unreachable while the load-factor invariant holds; seeing it means the
    /// table's bookkeeping is broken.
    #[error("Table full: no slot available among {capacity} (internal invariant violated)")]
    TableFull { capacity: usize },

    // -------------------------------------------------------------------------
    // Handle Errors
    // -------------------------------------------------------------------------
    #[error("Table handle is already bound to storage")]
    AlreadyInitialized,

    #[error("Table handle is not bound to storage")]
    NotInitialized,

    // -------------------------------------------------------------------------
    // Key Errors
    // -------------------------------------------------------------------------
    #[error("Invalid key: keys must be non-empty")]
    InvalidKey,

    #[error("Key not found")]
    NotFound,
}
