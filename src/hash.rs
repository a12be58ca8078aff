//! Hash function
//!
//! 64-bit FNV-1a over the raw key bytes. Deterministic across calls and
//! runs: there is no per-process seed, so a key always starts probing at the
//! same bucket for a given capacity.
//!
//! FNV-1a is not collision resistant. Adversarial keys can force long probe
//! chains; this is a known limitation, not a defect.

/// FNV-1a 64-bit offset basis
pub const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

/// FNV-1a 64-bit prime
pub const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Compute the FNV-1a digest of `bytes`
#[inline]
pub fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, &byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Starting bucket for `key` in a table of `capacity` slots
///
/// `capacity` must be non-zero.
#[inline]
pub fn bucket_index(key: &str, capacity: usize) -> usize {
    (fnv1a(key.as_bytes()) % capacity as u64) as usize
}
