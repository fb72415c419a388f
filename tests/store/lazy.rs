//! Deferred producers: invocation timing and path continuation.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use coffer_foundation::{CfMap, Permission, Value};
use coffer_store::{Resolved, Store, StoreValue};

// =============================================================================
// Invocation
// =============================================================================

#[test]
fn producer_is_not_invoked_at_write_time() {
    let calls = Rc::new(Cell::new(0u32));
    let counter = calls.clone();

    let store = Store::new();
    store
        .write(
            "deferred",
            StoreValue::lazy(move || {
                counter.set(counter.get() + 1);
                Resolved::Data(Value::Int(1))
            }),
        )
        .unwrap();

    assert_eq!(calls.get(), 0);
    store.read("deferred").unwrap();
    assert_eq!(calls.get(), 1);
}

#[test]
fn producer_is_invoked_on_every_read() {
    let calls = Rc::new(Cell::new(0u32));
    let counter = calls.clone();

    let store = Store::new();
    store
        .write(
            "deferred",
            StoreValue::lazy(move || {
                counter.set(counter.get() + 1);
                Resolved::Data(Value::Int(1))
            }),
        )
        .unwrap();

    store.read("deferred").unwrap();
    store.read("deferred").unwrap();
    store.read("deferred").unwrap();
    assert_eq!(calls.get(), 3);
}

#[test]
fn denied_lazy_property_is_never_invoked() {
    let calls = Rc::new(Cell::new(0u32));
    let counter = calls.clone();

    let store = Store::new();
    store
        .write(
            "deferred",
            StoreValue::lazy(move || {
                counter.set(counter.get() + 1);
                Resolved::Data(Value::Int(1))
            }),
        )
        .unwrap();
    store.restrict("deferred", Permission::Write);

    assert!(store.read("deferred").is_err());
    assert_eq!(calls.get(), 0);
}

// =============================================================================
// Path Continuation
// =============================================================================

#[test]
fn path_continues_through_produced_data() {
    let store = Store::new();
    store
        .write(
            "getCredentials",
            StoreValue::lazy(|| {
                let creds: CfMap<Arc<str>, Value> =
                    [(Arc::from("username"), Value::from("user1"))]
                        .into_iter()
                        .collect();
                Resolved::Data(Value::Map(creds))
            }),
        )
        .unwrap();

    assert_eq!(
        store.read("getCredentials:username").unwrap(),
        Value::from("user1")
    );
}

#[test]
fn path_continues_through_produced_node() {
    let store = Store::new();
    store
        .write(
            "child",
            StoreValue::lazy(|| {
                let node = Store::new();
                node.write("k", "v").unwrap();
                Resolved::Node(node)
            }),
        )
        .unwrap();

    assert_eq!(store.read("child:k").unwrap(), Value::from("v"));
}

#[test]
fn produced_node_enforces_its_own_permissions() {
    let store = Store::new();
    store
        .write(
            "child",
            StoreValue::lazy(|| {
                let node = Store::new();
                node.set_default_policy(Permission::None);
                Resolved::Node(node)
            }),
        )
        .unwrap();

    assert!(store.read("child:k").is_err());
}

#[test]
fn each_read_produces_a_fresh_node() {
    let store = Store::new();
    store
        .write("fresh", StoreValue::lazy(|| Resolved::Node(Store::new())))
        .unwrap();

    let first = store.read("fresh").unwrap().into_node().unwrap();
    let second = store.read("fresh").unwrap().into_node().unwrap();
    assert!(!first.same_node(&second));
}

#[test]
fn overwriting_a_lazy_slot_discards_the_producer() {
    let store = Store::new();
    store
        .write("slot", StoreValue::lazy(|| Resolved::Data(Value::Int(1))))
        .unwrap();
    store.write("slot", 2i64).unwrap();
    assert_eq!(store.read("slot").unwrap(), Value::Int(2));
}
