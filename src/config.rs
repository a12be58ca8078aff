//! Configuration for tagmap
//!
//! Centralized configuration with sensible defaults.

/// Capacity used when none (or zero) is requested
pub const DEFAULT_CAPACITY: usize = 64;

/// Usable key bytes of the legacy fixed-size key buffer (32 bytes minus terminator)
pub const LEGACY_MAX_KEY_LEN: usize = 31;

/// Configuration for a [`HashTable`](crate::HashTable)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Number of slots allocated up front (0 means `DEFAULT_CAPACITY`)
    pub initial_capacity: usize,

    // -------------------------------------------------------------------------
    // Key Configuration
    // -------------------------------------------------------------------------
    /// Maximum key length in bytes. `None` keeps keys whole.
    ///
    /// When set, keys are cut at the last UTF-8 character boundary that fits,
    /// on every operation, so two keys sharing the truncated prefix are the
    /// same key.
    pub max_key_len: Option<usize>,

    // -------------------------------------------------------------------------
    // Tombstone Configuration
    // -------------------------------------------------------------------------
    /// Rebuild in place when occupied plus deleted slots reach the load limit
    pub compact_tombstones: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            max_key_len: None,
            compact_tombstones: true,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Capacity actually allocated for this config
    pub fn effective_capacity(&self) -> usize {
        if self.initial_capacity == 0 {
            DEFAULT_CAPACITY
        } else {
            self.initial_capacity
        }
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the initial slot count
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.config.initial_capacity = capacity;
        self
    }

    /// Truncate keys to at most `len` bytes
    pub fn max_key_len(mut self, len: usize) -> Self {
        self.config.max_key_len = Some(len);
        self
    }

    /// Enable or disable in-place tombstone compaction
    pub fn compact_tombstones(mut self, enabled: bool) -> Self {
        self.config.compact_tombstones = enabled;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
