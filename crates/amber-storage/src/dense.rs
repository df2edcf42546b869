//! Dense associative storage with swap-erase removal.

use std::{fmt, hash::Hash};

use hashbrown::HashMap;

/// A key-value map backed by paired dense arrays.
///
/// `keys` and `values` always have the same length and no gaps; `index`
/// maps each present key to its position in both arrays, so
/// `keys[index[k]] == k` holds for every present key.
///
/// Keys are small handle values (`Copy`), since each key is stored twice:
/// once in the dense array and once in the index.
///
/// Callers must not retain positions across mutations: removal moves the
/// last element into the vacated slot.
pub struct DenseMap<K, V> {
    /// Dense array of present keys.
    keys: Vec<K>,
    /// Dense array of values, parallel to `keys`.
    values: Vec<V>,
    /// Map from key to its position in the dense arrays.
    index: HashMap<K, usize>,
}

impl<K, V> DenseMap<K, V>
where
    K: Copy + Eq + Hash,
{
    /// Create a new empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            values: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Create a map with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            keys: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Get the number of present keys.
    #[must_use]
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.keys.len(), self.values.len());
        self.keys.len()
    }

    /// Check if the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Check if a key is present.
    #[must_use]
    pub fn contains_key(&self, key: K) -> bool {
        self.index.contains_key(&key)
    }

    /// Insert a value for a key.
    ///
    /// If the key is already present, the value is overwritten in place
    /// (its position is unchanged) and the old value is returned.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&position) = self.index.get(&key) {
            return Some(std::mem::replace(&mut self.values[position], value));
        }

        self.index.insert(key, self.keys.len());
        self.keys.push(key);
        self.values.push(value);
        None
    }

    /// Get a reference to the value for a key.
    #[must_use]
    pub fn get(&self, key: K) -> Option<&V> {
        let &position = self.index.get(&key)?;
        Some(&self.values[position])
    }

    /// Get a mutable reference to the value for a key.
    #[must_use]
    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        let &position = self.index.get(&key)?;
        Some(&mut self.values[position])
    }

    /// Remove a key and return its value.
    ///
    /// The last key/value pair is swapped into the vacated slot and its
    /// recorded position is updated, keeping both arrays gap-free.
    pub fn remove(&mut self, key: K) -> Option<V> {
        let position = self.index.remove(&key)?;

        self.keys.swap_remove(position);
        let value = self.values.swap_remove(position);

        // Fix up the moved key's position, unless the removed slot was last.
        if position < self.keys.len() {
            self.index.insert(self.keys[position], position);
        }

        Some(value)
    }

    /// Remove all keys and values.
    pub fn clear(&mut self) {
        self.keys.clear();
        self.values.clear();
        self.index.clear();
    }

    /// The dense key array.
    ///
    /// A restartable, live view: it reflects the map's contents at the
    /// time of each traversal, in storage order (not insertion order once
    /// any removal has happened).
    #[must_use]
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// The dense value array, parallel to [`keys`](Self::keys).
    #[must_use]
    pub fn values(&self) -> &[V] {
        &self.values
    }

    /// The dense value array, mutably.
    #[must_use]
    pub fn values_mut(&mut self) -> &mut [V] {
        &mut self.values
    }

    /// Iterate over key-value pairs in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (K, &V)> {
        self.keys.iter().copied().zip(self.values.iter())
    }
}

impl<K, V> Default for DenseMap<K, V>
where
    K: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for DenseMap<K, V>
where
    K: Copy + Eq + Hash + fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
