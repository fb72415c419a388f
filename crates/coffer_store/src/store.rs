//! The store node and its recursive path protocol.
//!
//! A [`Store`] is one node in the tree: a default policy, instance-level
//! permission overrides, and an open, insertion-ordered set of named
//! properties. Each property slot holds plain data, a nested node, or a
//! deferred producer; `read` and `write` resolve delimiter-joined paths
//! recursively, enforcing permissions at node boundaries.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use coffer_foundation::{CfMap, Error, Permission, Result, Value};

use crate::path;
use crate::store_type::StoreType;

/// A deferred producer: a zero-argument capability invoked at resolution
/// time, never memoized. May manufacture a fresh node on every call, so
/// callers must not assume identity stability across repeated reads.
pub type Producer = Rc<dyn Fn() -> Resolved>;

/// What a property slot holds.
#[derive(Clone)]
pub enum StoreValue {
    /// Plain data: a primitive or structured value.
    Data(Value),
    /// A nested store node, held by reference.
    Node(Store),
    /// A deferred producer, invoked when path resolution needs a value.
    Lazy(Producer),
}

impl StoreValue {
    /// Creates a deferred producer slot from a closure.
    #[must_use]
    pub fn lazy(producer: impl Fn() -> Resolved + 'static) -> Self {
        Self::Lazy(Rc::new(producer))
    }

    /// Attempts to extract plain data.
    #[must_use]
    pub const fn as_data(&self) -> Option<&Value> {
        match self {
            Self::Data(v) => Some(v),
            _ => None,
        }
    }

    /// Attempts to extract a nested node.
    #[must_use]
    pub const fn as_node(&self) -> Option<&Store> {
        match self {
            Self::Node(n) => Some(n),
            _ => None,
        }
    }

    /// Returns true if this slot holds a deferred producer.
    #[must_use]
    pub const fn is_lazy(&self) -> bool {
        matches!(self, Self::Lazy(_))
    }
}

impl fmt::Debug for StoreValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Data(v) => write!(f, "{v:?}"),
            Self::Node(_) => write!(f, "<node>"),
            Self::Lazy(_) => write!(f, "<lazy>"),
        }
    }
}

impl PartialEq for StoreValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Data(a), Self::Data(b)) => a == b,
            (Self::Node(a), Self::Node(b)) => a.same_node(b),
            (Self::Lazy(a), Self::Lazy(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<Value> for StoreValue {
    fn from(v: Value) -> Self {
        Self::Data(v)
    }
}

impl From<Store> for StoreValue {
    fn from(n: Store) -> Self {
        Self::Node(n)
    }
}

impl From<bool> for StoreValue {
    fn from(b: bool) -> Self {
        Self::Data(Value::Bool(b))
    }
}

impl From<i64> for StoreValue {
    fn from(n: i64) -> Self {
        Self::Data(Value::Int(n))
    }
}

impl From<i32> for StoreValue {
    fn from(n: i32) -> Self {
        Self::Data(Value::Int(i64::from(n)))
    }
}

impl From<f64> for StoreValue {
    fn from(n: f64) -> Self {
        Self::Data(Value::Float(n))
    }
}

impl From<&str> for StoreValue {
    fn from(s: &str) -> Self {
        Self::Data(Value::from(s))
    }
}

impl From<String> for StoreValue {
    fn from(s: String) -> Self {
        Self::Data(Value::from(s))
    }
}

impl From<CfMap<Arc<str>, Value>> for StoreValue {
    fn from(m: CfMap<Arc<str>, Value>) -> Self {
        Self::Data(Value::Map(m))
    }
}

/// A property resolved to a concrete value: plain data or a live node.
///
/// Absence is represented as `Data(Value::Nil)`, never as an error.
#[derive(Clone, Debug)]
pub enum Resolved {
    /// Plain data (or `Value::Nil` for an absent property).
    Data(Value),
    /// A live store node.
    Node(Store),
}

impl Resolved {
    /// The absence marker.
    #[must_use]
    pub const fn absent() -> Self {
        Self::Data(Value::Nil)
    }

    /// Returns true if this resolution found nothing.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Data(Value::Nil))
    }

    /// Attempts to extract plain data.
    #[must_use]
    pub const fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Data(v) => Some(v),
            Self::Node(_) => None,
        }
    }

    /// Attempts to extract a node reference.
    #[must_use]
    pub const fn as_node(&self) -> Option<&Store> {
        match self {
            Self::Node(n) => Some(n),
            Self::Data(_) => None,
        }
    }

    /// Consumes the resolution, returning the node if it holds one.
    #[must_use]
    pub fn into_node(self) -> Option<Store> {
        match self {
            Self::Node(n) => Some(n),
            Self::Data(_) => None,
        }
    }

    /// Attempts to extract a string reference from plain data.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.as_value().and_then(Value::as_str)
    }

    /// Attempts to extract an integer from plain data.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        self.as_value().and_then(Value::as_int)
    }
}

impl PartialEq for Resolved {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Data(a), Self::Data(b)) => a == b,
            (Self::Node(a), Self::Node(b)) => a.same_node(b),
            _ => false,
        }
    }
}

impl PartialEq<Value> for Resolved {
    fn eq(&self, other: &Value) -> bool {
        self.as_value() == Some(other)
    }
}

struct Inner {
    ty: Option<Rc<StoreType>>,
    default_policy: Permission,
    overrides: HashMap<Arc<str>, Permission>,
    properties: CfMap<Arc<str>, StoreValue>,
}

/// A store node: one unit of the permission-gated tree.
///
/// `Store` is a cheap handle; cloning it aliases the same node, so a node
/// read out of a parent and written through stays visible from the parent.
/// Access is single-threaded and synchronous.
#[derive(Clone)]
pub struct Store {
    inner: Rc<RefCell<Inner>>,
}

impl Store {
    /// Creates an anonymous root node with the `rw` default policy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                ty: None,
                default_policy: Permission::default(),
                overrides: HashMap::new(),
                properties: CfMap::new(),
            })),
        }
    }

    /// Creates a node of the given type.
    ///
    /// The node starts with the type's default policy and its seed
    /// properties (installed without permission checks, like constructor
    /// field initialization).
    #[must_use]
    pub fn of(ty: Rc<StoreType>) -> Self {
        let store = Self {
            inner: Rc::new(RefCell::new(Inner {
                default_policy: ty.initial_policy(),
                ty: Some(ty.clone()),
                overrides: HashMap::new(),
                properties: CfMap::new(),
            })),
        };
        for (property, seed) in ty.seeds() {
            store.install(property, seed);
        }
        store
    }

    /// Returns the node's type, if it was built from one.
    #[must_use]
    pub fn store_type(&self) -> Option<Rc<StoreType>> {
        self.inner.borrow().ty.clone()
    }

    /// Returns the node's default policy.
    #[must_use]
    pub fn default_policy(&self) -> Permission {
        self.inner.borrow().default_policy
    }

    /// Replaces the node's default policy.
    ///
    /// The default policy is a control field, not a property: it is never
    /// path-gated and never appears in `entries()`.
    pub fn set_default_policy(&self, policy: Permission) {
        self.inner.borrow_mut().default_policy = policy;
    }

    /// Overrides the permission for one property on this node only.
    ///
    /// Takes priority over any type-level declaration, effective for every
    /// subsequent check; other instances of the same type are unaffected.
    pub fn restrict(&self, property: impl Into<Arc<str>>, permission: Permission) {
        self.inner
            .borrow_mut()
            .overrides
            .insert(property.into(), permission);
    }

    /// Resolves the effective permission for a property.
    ///
    /// Lookup order: instance override, then the type chain (most-derived
    /// first), then the node's default policy.
    #[must_use]
    pub fn permission_for(&self, property: &str) -> Permission {
        Self::permission_of(&self.inner.borrow(), property)
    }

    /// Returns true if the property may be read.
    #[must_use]
    pub fn allowed_to_read(&self, property: &str) -> bool {
        self.permission_for(property).allows_read()
    }

    /// Returns true if the property may be written.
    #[must_use]
    pub fn allowed_to_write(&self, property: &str) -> bool {
        self.permission_for(property).allows_write()
    }

    /// Reads the value at a delimiter-joined path.
    ///
    /// The empty path resolves to this node itself. The permission check on
    /// each node-level segment runs before the existence check, so reading a
    /// denied key fails even if the key is absent; a permitted absent key
    /// resolves to the absence marker, never an error. Nested nodes enforce
    /// their own permissions for the remaining path; plain data is descended
    /// member-by-member with no further checks.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReadNotAllowed`] when a node-level segment is denied.
    pub fn read(&self, path: &str) -> Result<Resolved> {
        if path.is_empty() {
            return Ok(Resolved::Node(self.clone()));
        }
        let (first, rest) = path::split_first(path);
        if !self.allowed_to_read(first) {
            return Err(Error::read_not_allowed(first));
        }
        let slot = self.inner.borrow().properties.get(first).cloned();
        match slot {
            Some(StoreValue::Node(node)) => node.read(rest),
            Some(StoreValue::Lazy(producer)) => resolve_through(producer(), rest),
            Some(StoreValue::Data(value)) => {
                if rest.is_empty() {
                    Ok(Resolved::Data(value))
                } else {
                    Ok(Resolved::Data(descend_plain(&value, rest)))
                }
            }
            None => Ok(Resolved::absent()),
        }
    }

    /// Writes a value at a delimiter-joined path, returning the value
    /// written for chaining.
    ///
    /// A path continuing into an existing nested node delegates
    /// unconditionally: only the child's own permissions govern the
    /// remaining path. Otherwise the first segment is permission-checked
    /// here. An exhausted path stores the value (structured data
    /// auto-vivifies a fresh child node populated via [`Self::write_entries`],
    /// replacing any prior value); a continuing path with no node present
    /// auto-vivifies a fresh child and recurses into it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WriteNotAllowed`] when a non-delegated segment is
    /// denied.
    pub fn write(&self, path: &str, value: impl Into<StoreValue>) -> Result<StoreValue> {
        self.write_value(path, value.into())
    }

    fn write_value(&self, path: &str, value: StoreValue) -> Result<StoreValue> {
        let (first, rest) = path::split_first(path);
        if !rest.is_empty() {
            let existing = self.inner.borrow().properties.get(first).cloned();
            if let Some(StoreValue::Node(node)) = existing {
                return node.write_value(rest, value);
            }
        }
        if !self.allowed_to_write(first) {
            return Err(Error::write_not_allowed(first));
        }
        if rest.is_empty() {
            self.install(Arc::from(first), value.clone());
        } else {
            // Populate the fresh child before attaching it, so a parent is
            // never left holding a half-written chain.
            let child = Store::new();
            child.write_value(rest, value.clone())?;
            let mut inner = self.inner.borrow_mut();
            inner.properties = inner
                .properties
                .insert(Arc::from(first), StoreValue::Node(child));
        }
        Ok(value)
    }

    /// Writes each entry of structured data as a top-level property.
    ///
    /// Keys are whole property names, never split on the delimiter. Nested
    /// maps auto-vivify nested nodes; this is the mechanism by which plain
    /// data becomes a subtree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WriteNotAllowed`] on the first denied key; entries
    /// already written stay written.
    pub fn write_entries(&self, entries: &CfMap<Arc<str>, Value>) -> Result<()> {
        for (property, value) in entries.iter() {
            if !self.allowed_to_write(property) {
                return Err(Error::write_not_allowed(property.clone()));
            }
            self.install(property.clone(), StoreValue::Data(value.clone()));
        }
        Ok(())
    }

    /// Returns a snapshot of every readable own property, in insertion
    /// order.
    ///
    /// Nested nodes are included by reference, not deep-copied. The default
    /// policy is a control field and never appears.
    #[must_use]
    pub fn entries(&self) -> CfMap<Arc<str>, StoreValue> {
        let inner = self.inner.borrow();
        let mut snapshot = CfMap::new();
        for (property, slot) in inner.properties.iter() {
            if Self::permission_of(&inner, property).allows_read() {
                snapshot = snapshot.insert(property.clone(), slot.clone());
            }
        }
        snapshot
    }

    /// Returns true if both handles alias the same node.
    #[must_use]
    pub fn same_node(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    // Permission lookup against an already-borrowed inner, for iteration.
    fn permission_of(inner: &Inner, property: &str) -> Permission {
        if let Some(permission) = inner.overrides.get(property) {
            return *permission;
        }
        if let Some(permission) = inner.ty.as_ref().and_then(|ty| ty.permission(property)) {
            return permission;
        }
        inner.default_policy
    }

    // Raw slot assignment: no permission check, structured data vivified
    // into a fresh child node. Shared by `write`, `write_entries`, and seed
    // installation.
    fn install(&self, property: Arc<str>, value: StoreValue) {
        let stored = match value {
            StoreValue::Data(Value::Map(entries)) => StoreValue::Node(Self::vivified(&entries)),
            other => other,
        };
        let mut inner = self.inner.borrow_mut();
        inner.properties = inner.properties.insert(property, stored);
    }

    // A fresh anonymous node populated from structured data. The fresh node
    // carries the `rw` default policy, so population cannot be denied.
    fn vivified(entries: &CfMap<Arc<str>, Value>) -> Self {
        let child = Self::new();
        for (property, value) in entries.iter() {
            child.install(property.clone(), StoreValue::Data(value.clone()));
        }
        child
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Store")
            .field(
                "type",
                &inner.ty.as_ref().map_or("<anonymous>", |ty| ty.name()),
            )
            .field("default_policy", &inner.default_policy)
            .field("properties", &inner.properties)
            .finish()
    }
}

/// Continues path resolution against a freshly produced value.
fn resolve_through(produced: Resolved, rest: &str) -> Result<Resolved> {
    match produced {
        Resolved::Node(node) => node.read(rest),
        Resolved::Data(value) => {
            if rest.is_empty() {
                Ok(Resolved::Data(value))
            } else {
                Ok(Resolved::Data(descend_plain(&value, rest)))
            }
        }
    }
}

/// Descends through plain structured data by direct member access.
///
/// Permission is enforced only at node boundaries, not inside data blobs.
/// Maps are indexed by key, lists by numeric index; any miss resolves the
/// whole descent to `Nil`.
fn descend_plain(value: &Value, rest: &str) -> Value {
    let mut current = value.clone();
    for segment in rest.split(path::DELIMITER) {
        current = match &current {
            Value::Map(map) => map.get(segment).cloned().unwrap_or(Value::Nil),
            Value::List(list) => segment
                .parse::<usize>()
                .ok()
                .and_then(|index| list.get(index).cloned())
                .unwrap_or(Value::Nil),
            _ => Value::Nil,
        };
    }
    current
}
