//! Integration tests for Value types
//!
//! Tests Value enum variants, equality, display, and classification.

use std::sync::Arc;

use coffer_foundation::collections::{CfMap, CfVec};
use coffer_foundation::Value;

// =============================================================================
// Value Construction
// =============================================================================

#[test]
fn value_nil() {
    let v = Value::Nil;
    assert!(v.is_nil());
    assert!(v.is_primitive());
}

#[test]
fn value_bool() {
    let v = Value::Bool(true);
    assert_eq!(v.as_bool(), Some(true));
    assert_eq!(v.as_int(), None);
}

#[test]
fn value_int() {
    let v = Value::Int(42);
    assert_eq!(v.as_int(), Some(42));
    assert_eq!(v.as_float(), None);
}

#[test]
fn value_float() {
    let v = Value::Float(1.5);
    assert_eq!(v.as_float(), Some(1.5));
    assert_eq!(v.as_int(), None);
}

#[test]
fn value_string() {
    let v = Value::String(Arc::from("hello"));
    assert_eq!(v.as_str(), Some("hello"));
}

#[test]
fn value_list() {
    let v: Value = vec![1i32, 2, 3].into();
    let list = v.as_list().unwrap();
    assert_eq!(list.len(), 3);
    assert_eq!(list.get(2), Some(&Value::Int(3)));
}

#[test]
fn value_map() {
    let m: CfMap<Arc<str>, Value> = CfMap::new().insert(Arc::from("k"), Value::Int(1));
    let v = Value::Map(m);
    assert_eq!(v.as_map().unwrap().get("k"), Some(&Value::Int(1)));
}

// =============================================================================
// Classification
// =============================================================================

#[test]
fn primitives_classified() {
    assert!(Value::Nil.is_primitive());
    assert!(Value::Bool(false).is_primitive());
    assert!(Value::Int(0).is_primitive());
    assert!(Value::Float(0.0).is_primitive());
    assert!(Value::from("s").is_primitive());
}

#[test]
fn structured_classified() {
    assert!(Value::List(CfVec::new()).is_structured());
    assert!(Value::Map(CfMap::new()).is_structured());
    assert!(!Value::List(CfVec::new()).is_primitive());
}

// =============================================================================
// Equality
// =============================================================================

#[test]
fn value_equality_across_types() {
    assert_eq!(Value::Int(1), Value::Int(1));
    assert_ne!(Value::Int(1), Value::Float(1.0));
    assert_ne!(Value::Nil, Value::Bool(false));
}

#[test]
fn nan_is_self_equal() {
    // Bit equality keeps Eq reflexive for floats.
    let nan = Value::Float(f64::NAN);
    assert_eq!(nan, nan);
}

#[test]
fn map_equality_ignores_insertion_order() {
    let a: CfMap<Arc<str>, Value> = CfMap::new()
        .insert(Arc::from("x"), Value::Int(1))
        .insert(Arc::from("y"), Value::Int(2));
    let b: CfMap<Arc<str>, Value> = CfMap::new()
        .insert(Arc::from("y"), Value::Int(2))
        .insert(Arc::from("x"), Value::Int(1));
    assert_eq!(Value::Map(a), Value::Map(b));
}

// =============================================================================
// Display
// =============================================================================

#[test]
fn display_forms() {
    assert_eq!(format!("{}", Value::Nil), "nil");
    assert_eq!(format!("{}", Value::Int(7)), "7");
    assert_eq!(format!("{}", Value::from("x")), "x");
    let list: Value = vec![1i32, 2].into();
    assert_eq!(format!("{list}"), "[1, 2]");
}
