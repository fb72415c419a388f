//! Integration tests for persistent collections
//!
//! Tests structural sharing and, for CfMap, insertion-order semantics.

use coffer_foundation::collections::{CfMap, CfVec};

// =============================================================================
// CfVec
// =============================================================================

#[test]
fn vec_basic_ops() {
    let v = CfVec::new().push_back(1).push_back(2).push_back(3);
    assert_eq!(v.len(), 3);
    assert_eq!(v.first(), Some(&1));
    assert_eq!(v.last(), Some(&3));
}

#[test]
fn vec_is_persistent() {
    let v1 = CfVec::new().push_back("a");
    let v2 = v1.push_back("b");
    assert_eq!(v1.len(), 1);
    assert_eq!(v2.len(), 2);
}

#[test]
fn vec_from_iterator() {
    let v: CfVec<i64> = (0..5).collect();
    assert_eq!(v.len(), 5);
    assert_eq!(v.get(4), Some(&4));
}

// =============================================================================
// CfMap
// =============================================================================

#[test]
fn map_preserves_insertion_order() {
    let m = CfMap::new()
        .insert("charlie", 3)
        .insert("alpha", 1)
        .insert("bravo", 2);

    let keys: Vec<_> = m.keys().copied().collect();
    assert_eq!(keys, vec!["charlie", "alpha", "bravo"]);

    let values: Vec<_> = m.values().copied().collect();
    assert_eq!(values, vec![3, 1, 2]);
}

#[test]
fn map_replacement_keeps_original_position() {
    let m = CfMap::new()
        .insert("a", 1)
        .insert("b", 2)
        .insert("a", 100);

    let pairs: Vec<_> = m.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(pairs, vec![("a", 100), ("b", 2)]);
}

#[test]
fn map_is_persistent() {
    let m1 = CfMap::new().insert("k", 1);
    let m2 = m1.insert("k", 2);
    assert_eq!(m1.get("k"), Some(&1));
    assert_eq!(m2.get("k"), Some(&2));
}

#[test]
fn map_borrowed_key_lookup() {
    use std::sync::Arc;
    let m: CfMap<Arc<str>, i64> = CfMap::new().insert(Arc::from("key"), 1);
    // Lookup by &str against Arc<str> keys.
    assert_eq!(m.get("key"), Some(&1));
    assert!(m.contains_key("key"));
}

#[test]
fn map_remove_maintains_order() {
    let m = CfMap::new()
        .insert("a", 1)
        .insert("b", 2)
        .insert("c", 3)
        .remove("b");
    let keys: Vec<_> = m.keys().copied().collect();
    assert_eq!(keys, vec!["a", "c"]);
}
