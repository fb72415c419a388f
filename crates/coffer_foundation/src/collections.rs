//! Persistent collections with structural sharing.
//!
//! Thin wrappers around the `im` crate's persistent data structures.
//! [`CfMap`] additionally tracks insertion order, which `im::HashMap` does
//! not: property order is observable through a store's `entries()` snapshot.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::iter::FromIterator;

/// Persistent vector with structural sharing.
///
/// Cloning is O(1). Modifications return a new vector sharing structure
/// with the original.
#[derive(Clone, Default)]
pub struct CfVec<T>(im::Vector<T>)
where
    T: Clone;

impl<T: Clone> CfVec<T> {
    /// Creates an empty vector.
    #[must_use]
    pub fn new() -> Self {
        Self(im::Vector::new())
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the vector is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Gets an element by index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.0.get(index)
    }

    /// Returns a new vector with the element appended.
    #[must_use]
    pub fn push_back(&self, value: T) -> Self {
        let mut new = self.0.clone();
        new.push_back(value);
        Self(new)
    }

    /// Returns an iterator over the elements.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }

    /// Returns the first element.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.0.front()
    }

    /// Returns the last element.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.0.back()
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for CfVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Clone + PartialEq> PartialEq for CfVec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T: Clone + Eq> Eq for CfVec<T> {}

impl<T: Clone> FromIterator<T> for CfVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(im::Vector::from_iter(iter))
    }
}

impl<T: Clone> IntoIterator for CfVec<T> {
    type Item = T;
    type IntoIter = im::vector::ConsumingIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T: Clone> IntoIterator for &'a CfVec<T> {
    type Item = &'a T;
    type IntoIter = im::vector::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Persistent, insertion-ordered map with structural sharing.
///
/// Backed by an `im::HashMap` for lookup plus an `im::Vector` of keys for
/// order. Inserting an existing key replaces its value in place; a new key
/// is appended. Iteration follows insertion order.
#[derive(Clone, Default)]
pub struct CfMap<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    order: im::Vector<K>,
    values: im::HashMap<K, V>,
}

impl<K: Clone + Eq + Hash, V: Clone> CfMap<K, V> {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            order: im::Vector::new(),
            values: im::HashMap::new(),
        }
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Gets a value by key.
    #[must_use]
    pub fn get<BK>(&self, key: &BK) -> Option<&V>
    where
        BK: Hash + Eq + ?Sized,
        K: Borrow<BK>,
    {
        self.values.get(key)
    }

    /// Returns true if the map contains the key.
    #[must_use]
    pub fn contains_key<BK>(&self, key: &BK) -> bool
    where
        BK: Hash + Eq + ?Sized,
        K: Borrow<BK>,
    {
        self.values.contains_key(key)
    }

    /// Returns a new map with the key-value pair inserted.
    ///
    /// An existing key keeps its position in the iteration order; a new key
    /// is appended at the end.
    #[must_use]
    pub fn insert(&self, key: K, value: V) -> Self {
        let order = if self.values.contains_key(&key) {
            self.order.clone()
        } else {
            let mut order = self.order.clone();
            order.push_back(key.clone());
            order
        };
        let mut values = self.values.clone();
        values.insert(key, value);
        Self { order, values }
    }

    /// Returns a new map with the key removed.
    #[must_use]
    pub fn remove<BK>(&self, key: &BK) -> Self
    where
        BK: Hash + Eq + ?Sized,
        K: Borrow<BK>,
    {
        let mut values = self.values.clone();
        if values.remove(key).is_none() {
            return self.clone();
        }
        let mut order = self.order.clone();
        if let Some(pos) = order.iter().position(|k| k.borrow() == key) {
            order.remove(pos);
        }
        Self { order, values }
    }

    /// Returns an iterator over key-value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.order
            .iter()
            .filter_map(|k| self.values.get(k).map(|v| (k, v)))
    }

    /// Returns an iterator over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.order.iter()
    }

    /// Returns an iterator over values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }
}

impl<K: Clone + Eq + Hash + fmt::Debug, V: Clone + fmt::Debug> fmt::Debug for CfMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

// Equality is content-based: insertion order does not affect comparison.
impl<K: Clone + Eq + Hash, V: Clone + PartialEq> PartialEq for CfMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl<K: Clone + Eq + Hash, V: Clone + Eq> Eq for CfMap<K, V> {}

impl<K: Clone + Eq + Hash, V: Clone> FromIterator<(K, V)> for CfMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map = map.insert(k, v);
        }
        map
    }
}
