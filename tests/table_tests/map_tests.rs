//! HashTable Tests
//!
//! Tests verify:
//! - Basic set/get/delete operations
//! - Overwrite and type tag changes
//! - Size tracking across delete and reinsert
//! - Growth before the load limit
//! - Key validation and truncation

use std::collections::HashSet;

use tagmap::config::LEGACY_MAX_KEY_LEN;
use tagmap::hash::bucket_index;
use tagmap::{Config, HashTable, SlotState, TableError, Value, ValueType};

// =============================================================================
// Helper Functions
// =============================================================================

fn max_load(capacity: usize) -> usize {
    capacity * 3 / 4
}

fn key_set(table: &HashTable) -> HashSet<String> {
    table.iter().map(|e| e.key().to_string()).collect()
}

/// A new key whose start bucket is currently empty
fn key_on_empty_slot(table: &HashTable) -> String {
    (0..)
        .map(|i| format!("fill{}", i))
        .find(|k| {
            let bucket = bucket_index(k, table.capacity());
            table.slot_state(bucket) == Some(SlotState::Empty)
        })
        .unwrap()
}

// =============================================================================
// Basic Operations Tests
// =============================================================================

#[test]
fn test_new_table_is_empty() {
    let table = HashTable::new(16).unwrap();
    assert_eq!(table.len(), 0);
    assert_eq!(table.capacity(), 16);
    assert_eq!(table.tombstones(), 0);
    assert!(table.is_empty());
}

#[test]
fn test_zero_capacity_uses_default() {
    let table = HashTable::new(0).unwrap();
    assert_eq!(table.capacity(), 64);
}

#[test]
fn test_set_and_get() {
    let mut table = HashTable::new(16).unwrap();

    assert_eq!(table.set("key1", 42), Ok(None));

    let entry = table.get("key1").unwrap();
    assert_eq!(entry.key(), "key1");
    assert_eq!(entry.value(), &Value::Int(42));
    assert_eq!(entry.value_type(), ValueType::Int);
}

#[test]
fn test_round_trip_all_types() {
    let mut table = HashTable::new(16).unwrap();

    table.set("int", -7i64).unwrap();
    table.set("float", 3.25).unwrap();
    table.set("string", "hello").unwrap();

    assert_eq!(table.get("int").unwrap().value(), &Value::Int(-7));
    assert_eq!(table.get("float").unwrap().value(), &Value::Float(3.25));
    assert_eq!(table.get("string").unwrap().value(), &Value::Str("hello".to_string()));

    assert_eq!(table.get("int").unwrap().value_type(), ValueType::Int);
    assert_eq!(table.get("float").unwrap().value_type(), ValueType::Float);
    assert_eq!(table.get("string").unwrap().value_type(), ValueType::String);

    assert_eq!(table.get("int").unwrap().value().as_int(), Some(-7));
    assert_eq!(table.get("float").unwrap().value().as_float(), Some(3.25));
    assert_eq!(table.get("float").unwrap().value().as_int(), None);
    assert_eq!(table.get("int").unwrap().value().as_str(), None);
}

#[test]
fn test_get_nonexistent_key() {
    let mut table = HashTable::new(16).unwrap();
    table.set("present", 1).unwrap();

    assert!(table.get("absent").is_none());
    assert!(!table.contains_key("absent"));
    assert!(table.contains_key("present"));
}

#[test]
fn test_empty_table_get_and_delete() {
    let mut table = HashTable::new(8).unwrap();

    assert!(table.get("anything").is_none());
    assert_eq!(table.delete("anything"), Err(TableError::NotFound));
    assert_eq!(table.len(), 0);
    assert_eq!(table.tombstones(), 0);
}

// =============================================================================
// Overwrite Tests
// =============================================================================

#[test]
fn test_set_overwrites_existing() {
    let mut table = HashTable::new(16).unwrap();

    table.set("key", 1).unwrap();
    let size_after_first = table.len();

    let previous = table.set("key", 2).unwrap();

    assert_eq!(previous, Some(Value::Int(1)));
    assert_eq!(table.len(), size_after_first);
    assert_eq!(table.get("key").unwrap().value(), &Value::Int(2));
}

#[test]
fn test_overwrite_changes_type_tag() {
    let mut table = HashTable::new(16).unwrap();

    table.set("key", 1).unwrap();
    let previous = table.set("key", "now a string").unwrap();

    assert_eq!(previous, Some(Value::Int(1)));
    let entry = table.get("key").unwrap();
    assert_eq!(entry.value_type(), ValueType::String);
    assert_eq!(entry.value().as_str(), Some("now a string"));
}

// =============================================================================
// Delete Tests
// =============================================================================

#[test]
fn test_delete_then_miss() {
    let mut table = HashTable::new(16).unwrap();

    table.set("key", 5).unwrap();
    assert_eq!(table.delete("key"), Ok(Value::Int(5)));

    assert!(table.get("key").is_none());
    assert_eq!(table.len(), 0);
    assert_eq!(table.tombstones(), 1);
}

#[test]
fn test_delete_twice() {
    let mut table = HashTable::new(16).unwrap();

    table.set("key", 5).unwrap();
    table.delete("key").unwrap();

    assert_eq!(table.delete("key"), Err(TableError::NotFound));
    assert_eq!(table.tombstones(), 1);
}

#[test]
fn test_delete_then_reinsert() {
    let mut table = HashTable::new(16).unwrap();

    table.set("other", 0).unwrap();
    table.set("key", 1).unwrap();
    let size_before_delete = table.len();

    table.delete("key").unwrap();
    table.set("key", 2).unwrap();

    assert_eq!(table.len(), size_before_delete);
    assert_eq!(table.tombstones(), 0);
    assert_eq!(table.get("key").unwrap().value(), &Value::Int(2));
}

// =============================================================================
// Key Validation Tests
// =============================================================================

#[test]
fn test_empty_key_rejected() {
    let mut table = HashTable::new(16).unwrap();

    assert_eq!(table.set("", 1), Err(TableError::InvalidKey));
    assert!(table.get("").is_none());
    assert_eq!(table.delete(""), Err(TableError::NotFound));
    assert_eq!(table.len(), 0);
}

#[test]
fn test_long_keys_kept_whole_by_default() {
    let mut table = HashTable::new(16).unwrap();

    let base = "x".repeat(200);
    let first = format!("{}1", base);
    let second = format!("{}2", base);

    table.set(&first, 1).unwrap();
    table.set(&second, 2).unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.get(&first).unwrap().key(), first);
    assert_eq!(table.get(&second).unwrap().value(), &Value::Int(2));
}

#[test]
fn test_truncation_at_max_length_round_trips() {
    let config = Config::builder().max_key_len(LEGACY_MAX_KEY_LEN).build();
    let mut table = HashTable::with_config(config).unwrap();

    let exact = "k".repeat(LEGACY_MAX_KEY_LEN);
    table.set(&exact, 1).unwrap();

    assert_eq!(table.get(&exact).unwrap().key(), exact);
}

#[test]
fn test_truncation_one_byte_over() {
    let config = Config::builder().max_key_len(LEGACY_MAX_KEY_LEN).build();
    let mut table = HashTable::with_config(config).unwrap();

    let prefix = "k".repeat(LEGACY_MAX_KEY_LEN);
    let long_a = format!("{}a", prefix);
    let long_b = format!("{}b", prefix);

    table.set(&long_a, 1).unwrap();
    assert_eq!(table.get(&long_a).unwrap().key(), prefix);

    // Keys sharing the truncated prefix are the same key
    let previous = table.set(&long_b, 2).unwrap();
    assert_eq!(previous, Some(Value::Int(1)));
    assert_eq!(table.len(), 1);
    assert_eq!(table.get(&long_a).unwrap().value(), &Value::Int(2));
    assert_eq!(table.get(&prefix).unwrap().value(), &Value::Int(2));
}

#[test]
fn test_truncation_respects_char_boundary() {
    let config = Config::builder().max_key_len(4).build();
    let mut table = HashTable::with_config(config).unwrap();

    // 'é' occupies bytes 3..5, so the cut falls back to byte 3
    table.set("abcé", 1).unwrap();

    assert_eq!(table.get("abcé").unwrap().key(), "abc");
    assert_eq!(table.get("abc").unwrap().value(), &Value::Int(1));
}

// =============================================================================
// Growth Tests
// =============================================================================

#[test]
fn test_third_insert_into_four_slots_grows() {
    let mut table = HashTable::new(4).unwrap();

    table.set("a", 1).unwrap();
    table.set("b", 2).unwrap();
    assert_eq!(table.capacity(), 4);

    table.set("c", 3).unwrap();

    assert_eq!(table.capacity(), 8);
    assert_eq!(table.len(), 3);
    assert_eq!(table.get("a").unwrap().value(), &Value::Int(1));
    assert_eq!(table.get("b").unwrap().value(), &Value::Int(2));
    assert_eq!(table.get("c").unwrap().value(), &Value::Int(3));
}

#[test]
fn test_load_factor_bound_and_no_loss_on_growth() {
    let mut table = HashTable::new(1).unwrap();
    let mut inserted = HashSet::new();

    for i in 0..1000 {
        let key = format!("key{:04}", i);
        let before = key_set(&table);
        let capacity_before = table.capacity();

        table.set(&key, i).unwrap();
        inserted.insert(key.clone());

        assert!(table.len() <= max_load(table.capacity()));

        if table.capacity() != capacity_before {
            let mut expected = before;
            expected.insert(key);
            assert_eq!(key_set(&table), expected);
        }
    }

    assert_eq!(table.len(), 1000);
    assert_eq!(key_set(&table), inserted);
    assert_eq!(table.iter().count(), 1000);
}

#[test]
fn test_growth_drops_tombstones() {
    let config = Config::builder()
        .initial_capacity(8)
        .compact_tombstones(false)
        .build();
    let mut table = HashTable::with_config(config).unwrap();
    assert!(!table.config().compact_tombstones);

    for key in ["a", "b", "c", "d"] {
        table.set(key, 0).unwrap();
    }
    table.delete("a").unwrap();

    // Fill slots directly so the insert never passes over the tombstone
    let mut live: Vec<String> = vec!["b".into(), "c".into(), "d".into()];
    while table.len() < 5 {
        let key = key_on_empty_slot(&table);
        table.set(&key, 1).unwrap();
        live.push(key);
    }

    assert_eq!(table.capacity(), 8);
    assert_eq!(table.tombstones(), 1);

    // size + 1 now reaches floor(8 * 0.75)
    table.set("grow", 2).unwrap();
    live.push("grow".into());

    assert_eq!(table.capacity(), 16);
    assert_eq!(table.tombstones(), 0);
    assert_eq!(table.len(), 6);
    assert!(table.get("a").is_none());
    for key in &live {
        assert!(table.contains_key(key), "lost {}", key);
    }
}

#[test]
fn test_overwrite_at_load_limit_does_not_grow() {
    let mut table = HashTable::new(8).unwrap();

    for key in ["a", "b", "c", "d", "e"] {
        table.set(key, 1).unwrap();
    }
    assert_eq!(table.capacity(), 8);

    let previous = table.set("a", 2).unwrap();

    assert_eq!(previous, Some(Value::Int(1)));
    assert_eq!(table.capacity(), 8);
    assert_eq!(table.len(), 5);
    assert_eq!(table.get("a").unwrap().value().as_int(), Some(2));

    // A new key at the same load does grow
    table.set("f", 3).unwrap();
    assert_eq!(table.capacity(), 16);
}

// =============================================================================
// Allocation Tests
// =============================================================================

#[test]
fn test_impossible_capacity_fails_allocation() {
    let result = HashTable::new(usize::MAX);
    assert_eq!(
        result.unwrap_err(),
        TableError::AllocationFailure { requested: usize::MAX }
    );
}

#[test]
fn test_stats() {
    let mut table = HashTable::new(16).unwrap();
    table.set("a", 1).unwrap();
    table.set("b", 2).unwrap();
    table.delete("a").unwrap();

    let stats = table.stats();
    assert_eq!(stats.capacity, 16);
    assert_eq!(stats.size, 1);
    assert_eq!(stats.tombstones, 1);
    assert_eq!(stats.max_load, 12);
    assert!((table.load_factor() - 1.0 / 16.0).abs() < f64::EPSILON);
}
