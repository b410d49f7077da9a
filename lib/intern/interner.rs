use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use log::trace;
use rustc_hash::FxHasher;
use std::fmt;
use std::hash::{BuildHasherDefault, Hash};

/// An append-only table mapping structural keys to interned handles.
///
/// Lookups and inserts may happen from any number of threads. When two
/// threads intern the same key at once, exactly one handle is created and
/// both threads receive it.
pub struct Interner<K: Eq + Hash, V> {
    table: DashMap<K, V, BuildHasherDefault<FxHasher>>,
}

impl<K, V> Interner<K, V>
where
    K: Eq + Hash + fmt::Debug,
    V: Clone,
{
    /// Create a new, empty `Interner`.
    pub fn new() -> Interner<K, V> {
        Interner {
            table: DashMap::with_hasher(BuildHasherDefault::default()),
        }
    }

    /// Return the handle for `key`, creating it with `make` if this is the
    /// first time `key` has been interned.
    pub fn intern_with<F>(&self, key: K, make: F) -> V
    where
        F: FnOnce(&K) -> V,
    {
        if let Some(value) = self.table.get(&key) {
            return value.value().clone();
        }

        match self.table.entry(key) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(entry) => {
                trace!("interning {:?}", entry.key());
                let value = make(entry.key());
                entry.insert(value.clone());
                value
            }
        }
    }

    /// Return the handle for `key`, if it has been interned.
    pub fn get(&self, key: &K) -> Option<V> {
        self.table.get(key).map(|value| value.value().clone())
    }

    /// The number of distinct keys interned so far.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl<K, V> Default for Interner<K, V>
where
    K: Eq + Hash + fmt::Debug,
    V: Clone,
{
    fn default() -> Interner<K, V> {
        Interner::new()
    }
}

impl<K: Eq + Hash, V> fmt::Debug for Interner<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Interner {{ len: {} }}", self.table.len())
    }
}
