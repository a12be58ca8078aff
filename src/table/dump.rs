//! Debug dump of table contents
//!
//! ```text
//! --- Contents of map ---
//! |cap = 8 | size = 3|
//! 1 'b': 2
//! 4 'a': 1
//! --- End of map ---
//! ```

use std::fmt;

use super::HashTable;

impl fmt::Display for HashTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Contents of map ---")?;
        writeln!(f, "|cap = {} | size = {}|", self.capacity(), self.len())?;

        for entry in self.iter() {
            writeln!(f, "{} '{}': {}", entry.slot(), entry.key(), entry.value())?;
        }

        writeln!(f, "--- End of map ---")
    }
}
