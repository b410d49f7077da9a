use crate::intern::Address;
use crate::state::Lattice;
use crate::value_set::ValueSet;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::hash_map;
use std::fmt;
use std::hash::Hash;

/// A map from location keys to value sets, in which an absent key holds the
/// empty set.
///
/// Empty sets are never stored. Writing an empty set removes the key, so two
/// maps holding the same values are equal, no matter how they were built.
#[derive(Clone, Debug)]
pub struct DefaultMap<K: Eq + Hash> {
    entries: FxHashMap<K, ValueSet>,
    empty: ValueSet,
}

impl<K> DefaultMap<K>
where
    K: Clone + Eq + Hash + Ord,
{
    /// Create a new, empty `DefaultMap`.
    pub fn new() -> DefaultMap<K> {
        DefaultMap {
            entries: FxHashMap::default(),
            empty: ValueSet::new(),
        }
    }

    /// Get the values at `key`, or the empty set.
    pub fn get(&self, key: &K) -> &ValueSet {
        self.entries.get(key).unwrap_or(&self.empty)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Replace the values at `key` with `values`. Returns the values
    /// previously at `key`.
    pub fn put_strong(&mut self, key: K, values: ValueSet) -> Option<ValueSet> {
        if values.is_empty() {
            self.entries.remove(&key)
        } else {
            self.entries.insert(key, values)
        }
    }

    /// Add `values` to the values at `key`. Returns the values previously at
    /// `key`.
    pub fn put_weak(&mut self, key: K, values: &ValueSet) -> Option<ValueSet> {
        if values.is_empty() {
            return self.entries.get(&key).cloned();
        }
        match self.entries.entry(key) {
            hash_map::Entry::Occupied(mut entry) => {
                let merged = entry.get().union(values);
                Some(entry.insert(merged))
            }
            hash_map::Entry::Vacant(entry) => {
                entry.insert(values.clone());
                None
            }
        }
    }

    pub fn remove(&mut self, key: &K) -> Option<ValueSet> {
        self.entries.remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The number of keys holding a non-empty set.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> hash_map::Iter<K, ValueSet> {
        self.entries.iter()
    }

    pub fn keys(&self) -> hash_map::Keys<K, ValueSet> {
        self.entries.keys()
    }

    /// The entries of this map, ordered by key.
    pub fn sorted(&self) -> Vec<(&K, &ValueSet)> {
        let mut entries: Vec<(&K, &ValueSet)> = self.entries.iter().collect();
        entries.sort_by(|lhs, rhs| lhs.0.cmp(rhs.0));
        entries
    }

    /// Join this map with `other`, key by key.
    pub fn merge(&self, other: &DefaultMap<K>) -> DefaultMap<K> {
        let mut result = self.clone();
        for (key, values) in other.iter() {
            debug_assert!(!values.is_empty(), "empty value set stored in a map");
            result.put_weak(key.clone(), values);
        }
        result
    }

    /// For every key of this map, the values not held at the same key in
    /// `other`.
    pub fn minus(&self, other: &DefaultMap<K>) -> DefaultMap<K> {
        let mut result = DefaultMap::new();
        for (key, values) in self.iter() {
            result.put_strong(key.clone(), values.difference(other.get(key)));
        }
        result
    }

    /// A copy of this map holding only the keys for which `predicate` holds.
    pub fn filter<F>(&self, predicate: F) -> DefaultMap<K>
    where
        F: Fn(&K) -> bool,
    {
        DefaultMap {
            entries: self
                .entries
                .iter()
                .filter(|(key, _)| predicate(key))
                .map(|(key, values)| (key.clone(), values.clone()))
                .collect(),
            empty: self.empty.clone(),
        }
    }

    /// Every address held in any value set of this map.
    pub fn addresses(&self) -> FxHashSet<Address> {
        self.entries
            .values()
            .flat_map(|values| values.addresses().cloned())
            .collect()
    }

    /// A compact json representation of this map, with keys rendered by
    /// `label`.
    pub fn to_json<F>(&self, label: F) -> serde_json::Value
    where
        F: Fn(&K) -> String,
    {
        let object = self
            .entries
            .iter()
            .map(|(key, values)| {
                (
                    label(key),
                    serde_json::Value::Array(
                        values
                            .iter()
                            .map(|value| serde_json::Value::String(value.to_string()))
                            .collect(),
                    ),
                )
            })
            .collect();
        serde_json::Value::Object(object)
    }
}

impl<K> Default for DefaultMap<K>
where
    K: Clone + Eq + Hash + Ord,
{
    fn default() -> DefaultMap<K> {
        DefaultMap::new()
    }
}

impl<K> PartialEq for DefaultMap<K>
where
    K: Clone + Eq + Hash + Ord,
{
    fn eq(&self, other: &DefaultMap<K>) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(key, values)| other.get(key) == values)
    }
}

impl<K> Eq for DefaultMap<K> where K: Clone + Eq + Hash + Ord {}

impl<K> Lattice for DefaultMap<K>
where
    K: Clone + Eq + Hash + Ord,
{
    fn bottom() -> DefaultMap<K> {
        DefaultMap::new()
    }

    fn merge(&self, other: &DefaultMap<K>) -> DefaultMap<K> {
        DefaultMap::merge(self, other)
    }

    fn minus(&self, other: &DefaultMap<K>) -> DefaultMap<K> {
        DefaultMap::minus(self, other)
    }

    fn is_bottom(&self) -> bool {
        self.is_empty()
    }
}

impl<K> FromIterator<(K, ValueSet)> for DefaultMap<K>
where
    K: Clone + Eq + Hash + Ord,
{
    fn from_iter<I: IntoIterator<Item = (K, ValueSet)>>(iter: I) -> DefaultMap<K> {
        let mut map = DefaultMap::new();
        for (key, values) in iter {
            map.put_weak(key, &values);
        }
        map
    }
}

impl<K> fmt::Display for DefaultMap<K>
where
    K: Clone + Eq + Hash + Ord + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.sorted()
                .into_iter()
                .map(|(key, values)| format!("{}={}", key, values))
                .collect::<Vec<String>>()
                .join(", ")
        )
    }
}
