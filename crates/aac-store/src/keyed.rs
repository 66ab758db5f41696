use std::fmt;

use crate::error::{StoreError, StoreResult};
use crate::traits::StoreKey;

/// Capacity of a freshly created store.
pub const DEFAULT_CAPACITY: usize = 16;

/// A single key/value pair held by a [`KeyedStore`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry<K, V> {
    pub key: K,
    pub value: V,
}

/// Ordered key/value store with linear lookup and doubling growth.
///
/// Entries are kept in insertion order in a single vector; lookups scan it
/// front to back and compare keys by value. There is no hashing and no
/// ordering by key. The store tracks its own logical capacity, which starts
/// at [`DEFAULT_CAPACITY`] and doubles whenever an insert finds the store
/// full. It never shrinks.
///
/// Invariants:
/// - No two entries share an equal key.
/// - `len() <= capacity()`.
/// - Null keys (see [`StoreKey::is_null`]) are never stored and never match.
/// - Removal preserves the relative order of the remaining entries.
pub struct KeyedStore<K, V> {
    entries: Vec<Entry<K, V>>,
    capacity: usize,
}

impl<K: StoreKey, V> KeyedStore<K, V> {
    /// Create a new empty store with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty store able to hold at least `min` entries before
    /// growing. The capacity is the default doubled as often as needed.
    pub fn with_capacity(min: usize) -> Self {
        let capacity = grown_capacity(min);
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current logical capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bind `key` to `value`.
    ///
    /// An existing key keeps its position and has its value replaced. A new
    /// key is appended, doubling the capacity first if the store is full.
    pub fn set(&mut self, key: K, value: V) -> StoreResult<()> {
        if key.is_null() {
            return Err(StoreError::InvalidKey);
        }
        if let Some(index) = self.find(&key) {
            self.entries[index].value = value;
            return Ok(());
        }
        if self.entries.len() == self.capacity {
            self.expand();
        }
        self.entries.push(Entry { key, value });
        Ok(())
    }

    /// Get the value bound to `key`.
    pub fn get<Q>(&self, key: &Q) -> StoreResult<&V>
    where
        Q: StoreKey + ?Sized,
        K: PartialEq<Q>,
    {
        match self.find(key) {
            Some(index) => Ok(&self.entries[index].value),
            None => Err(StoreError::KeyNotFound(format!("{key:?}"))),
        }
    }

    /// Get a mutable reference to the value bound to `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> StoreResult<&mut V>
    where
        Q: StoreKey + ?Sized,
        K: PartialEq<Q>,
    {
        match self.find(key) {
            Some(index) => Ok(&mut self.entries[index].value),
            None => Err(StoreError::KeyNotFound(format!("{key:?}"))),
        }
    }

    /// Returns `true` if `key` is bound. Null keys are never bound.
    pub fn has_key<Q>(&self, key: &Q) -> bool
    where
        Q: StoreKey + ?Sized,
        K: PartialEq<Q>,
    {
        self.find(key).is_some()
    }

    /// Remove the entry for `key`, closing the gap it leaves.
    ///
    /// Returns the removed value, or `None` if the key was absent.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        Q: StoreKey + ?Sized,
        K: PartialEq<Q>,
    {
        let index = self.find(key)?;
        Some(self.entries.remove(index).value)
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|e| (&e.key, &e.value))
    }

    /// Iterate over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|e| &e.key)
    }

    /// Iterate over values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|e| &e.value)
    }

    /// Index of the first entry matching `key`.
    fn find<Q>(&self, key: &Q) -> Option<usize>
    where
        Q: StoreKey + ?Sized,
        K: PartialEq<Q>,
    {
        if key.is_null() {
            return None;
        }
        self.entries
            .iter()
            .position(|e| <K as PartialEq<Q>>::eq(&e.key, key))
    }

    fn expand(&mut self) {
        self.capacity *= 2;
        self.entries.reserve_exact(self.capacity - self.entries.len());
    }
}

/// Smallest `DEFAULT_CAPACITY * 2^k` that is at least `min`.
fn grown_capacity(min: usize) -> usize {
    let mut capacity = DEFAULT_CAPACITY;
    while capacity < min {
        capacity *= 2;
    }
    capacity
}

impl<K: StoreKey, V> Default for KeyedStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: StoreKey + Clone, V: Clone> Clone for KeyedStore<K, V> {
    /// Deep copy. The clone's capacity is regrown from the default until it
    /// covers the original's size, so it may be smaller than the original's.
    fn clone(&self) -> Self {
        let mut clone = Self::with_capacity(self.entries.len());
        clone.entries.extend(self.entries.iter().cloned());
        clone
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for KeyedStore<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Eq, V: Eq> Eq for KeyedStore<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for KeyedStore<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|e| (&e.key, &e.value)))
            .finish()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for KeyedStore<K, V> {
    /// Renders as `{key0:value0, key1:value1}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}:{}", entry.key, entry.value)?;
        }
        f.write_str("}")
    }
}

impl<K: StoreKey, V> FromIterator<(K, V)> for KeyedStore<K, V> {
    /// Collect pairs in order. Null keys are dropped; a repeated key keeps
    /// its first position and its last value.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut store = Self::new();
        for (key, value) in iter {
            // Only null keys fail, and those are skipped.
            let _ = store.set(key, value);
        }
        store
    }
}

impl<'a, K, V> IntoIterator for &'a KeyedStore<K, V> {
    type Item = &'a Entry<K, V>;
    type IntoIter = std::slice::Iter<'a, Entry<K, V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
