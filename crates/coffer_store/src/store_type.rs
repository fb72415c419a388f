//! Declared permission metadata for store node types.
//!
//! A [`StoreType`] is the explicit registry entry that replaces
//! decorator/reflection metadata: it maps property names to permissions for
//! every instance of the type, carries seed properties installed at
//! construction, and chains to a parent type for inheritance. Permission
//! lookup walks the chain most-derived first, so a derived type overriding a
//! property wins without affecting its ancestors.

use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use coffer_foundation::Permission;

use crate::store::StoreValue;

/// Permission metadata and seed properties shared by all instances of a
/// store node type.
///
/// Immutable once registered; shared via `Rc`. Built in the builder style:
///
/// ```
/// use coffer_foundation::Permission;
/// use coffer_store::StoreType;
///
/// let user = StoreType::new("user")
///     .with_permission("name", Permission::Read)
///     .with_seed("name", "John Doe")
///     .register();
/// let admin = StoreType::extending("admin", user).register();
/// ```
#[derive(Clone)]
pub struct StoreType {
    name: Arc<str>,
    parent: Option<Rc<StoreType>>,
    permissions: HashMap<Arc<str>, Permission>,
    default_policy: Option<Permission>,
    seeds: Vec<(Arc<str>, StoreValue)>,
}

impl StoreType {
    /// Creates a new root type with the given name.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            permissions: HashMap::new(),
            default_policy: None,
            seeds: Vec::new(),
        }
    }

    /// Creates a type deriving from `parent`.
    ///
    /// The derived type inherits the parent's declared permissions, default
    /// policy, and seeds; its own declarations take priority.
    #[must_use]
    pub fn extending(name: impl Into<Arc<str>>, parent: Rc<StoreType>) -> Self {
        Self {
            name: name.into(),
            parent: Some(parent),
            permissions: HashMap::new(),
            default_policy: None,
            seeds: Vec::new(),
        }
    }

    /// Declares a permission for a property on this type.
    #[must_use]
    pub fn with_permission(mut self, property: impl Into<Arc<str>>, permission: Permission) -> Self {
        self.permissions.insert(property.into(), permission);
        self
    }

    /// Declares the default policy applied to new instances of this type.
    #[must_use]
    pub fn with_default_policy(mut self, policy: Permission) -> Self {
        self.default_policy = Some(policy);
        self
    }

    /// Declares an initial property installed on every instance at
    /// construction.
    ///
    /// Seeds bypass permission checks, like field initialization in a
    /// constructor: a read-only property still receives its initial value.
    #[must_use]
    pub fn with_seed(mut self, property: impl Into<Arc<str>>, value: impl Into<StoreValue>) -> Self {
        self.seeds.push((property.into(), value.into()));
        self
    }

    /// Finishes the type, returning the shared handle instances are built
    /// from.
    #[must_use]
    pub fn register(self) -> Rc<Self> {
        Rc::new(self)
    }

    /// Returns the type's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the parent type, if any.
    #[must_use]
    pub fn parent(&self) -> Option<&Rc<StoreType>> {
        self.parent.as_ref()
    }

    /// Looks up the declared permission for a property.
    ///
    /// Walks the type chain most-derived first and returns the first
    /// declaration found. `None` is a valid, expected result signaling "use
    /// the node's default policy".
    #[must_use]
    pub fn permission(&self, property: &str) -> Option<Permission> {
        if let Some(permission) = self.permissions.get(property) {
            return Some(*permission);
        }
        self.parent.as_ref().and_then(|p| p.permission(property))
    }

    /// Returns the default policy for new instances, walking the chain.
    ///
    /// Falls back to [`Permission::ReadWrite`] when no ancestor declares one.
    #[must_use]
    pub fn initial_policy(&self) -> Permission {
        if let Some(policy) = self.default_policy {
            return policy;
        }
        self.parent
            .as_ref()
            .map_or_else(Permission::default, |p| p.initial_policy())
    }

    /// Collects the seeds for an instance, ancestors first.
    ///
    /// Ancestor seeds come before derived seeds so a derived type's seed for
    /// the same property wins when installed in order.
    pub(crate) fn seeds(&self) -> Vec<(Arc<str>, StoreValue)> {
        let mut seeds = self
            .parent
            .as_ref()
            .map_or_else(Vec::new, |p| p.seeds());
        seeds.extend(self.seeds.iter().cloned());
        seeds
    }
}

impl std::fmt::Debug for StoreType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreType")
            .field("name", &self.name)
            .field("parent", &self.parent.as_ref().map(|p| p.name()))
            .field("permissions", &self.permissions)
            .field("default_policy", &self.default_policy)
            .field("seeds", &self.seeds.len())
            .finish()
    }
}
