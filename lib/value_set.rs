//! Sets of abstract values.

use crate::intern::Address;
use crate::value::Value;
use crate::RC;
use serde::Serialize;
use std::collections::{btree_set, BTreeSet};
use std::fmt;

/// The values of every empty set.
static EMPTY: BTreeSet<Value> = BTreeSet::new();

/// An immutable set of abstract values.
///
/// Every location of the abstract state holds a `ValueSet`. Sets are shared,
/// cloning one is cheap, and operations over sets return new sets, sharing
/// an operand where the result equals it. The empty set does not allocate.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ValueSet {
    // Never `Some` of an empty set.
    values: Option<RC<BTreeSet<Value>>>,
}

impl ValueSet {
    /// Create a new, empty `ValueSet`.
    pub fn new() -> ValueSet {
        ValueSet::default()
    }

    fn from_set(values: BTreeSet<Value>) -> ValueSet {
        ValueSet {
            values: if values.is_empty() {
                None
            } else {
                Some(RC::new(values))
            },
        }
    }

    fn set(&self) -> &BTreeSet<Value> {
        self.values.as_deref().unwrap_or(&EMPTY)
    }

    /// Create a `ValueSet` holding exactly one value.
    pub fn singleton<V: Into<Value>>(value: V) -> ValueSet {
        let mut values = BTreeSet::new();
        values.insert(value.into());
        ValueSet::from_set(values)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_none()
    }

    pub fn len(&self) -> usize {
        self.set().len()
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.set().contains(value)
    }

    pub fn iter(&self) -> btree_set::Iter<Value> {
        self.set().iter()
    }

    /// The addresses held in this set.
    pub fn addresses(&self) -> impl Iterator<Item = &Address> {
        self.iter().filter_map(|value| value.address())
    }

    /// Returns true if every value of this set is in `other`.
    pub fn is_subset(&self, other: &ValueSet) -> bool {
        match (&self.values, &other.values) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(lhs), Some(rhs)) => RC::ptr_eq(lhs, rhs) || lhs.is_subset(rhs),
        }
    }

    /// The union of this set and `other`.
    pub fn union(&self, other: &ValueSet) -> ValueSet {
        if other.is_subset(self) {
            return self.clone();
        }
        if self.is_subset(other) {
            return other.clone();
        }
        let mut values = self.set().clone();
        values.extend(other.iter().cloned());
        ValueSet::from_set(values)
    }

    /// The values of this set which are not in `other`.
    pub fn difference(&self, other: &ValueSet) -> ValueSet {
        if other.is_empty() {
            return self.clone();
        }
        self.set().difference(other.set()).cloned().collect()
    }
}

impl Serialize for ValueSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.set().serialize(serializer)
    }
}

impl FromIterator<Value> for ValueSet {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> ValueSet {
        ValueSet::from_set(iter.into_iter().collect())
    }
}

impl From<Vec<Value>> for ValueSet {
    fn from(values: Vec<Value>) -> ValueSet {
        values.into_iter().collect()
    }
}

impl From<Value> for ValueSet {
    fn from(value: Value) -> ValueSet {
        ValueSet::singleton(value)
    }
}

impl<'s> IntoIterator for &'s ValueSet {
    type Item = &'s Value;
    type IntoIter = btree_set::Iter<'s, Value>;

    fn into_iter(self) -> btree_set::Iter<'s, Value> {
        self.iter()
    }
}

impl fmt::Display for ValueSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "[{}]",
            self.iter()
                .map(|value| format!("{}", value))
                .collect::<Vec<String>>()
                .join(", ")
        )
    }
}
