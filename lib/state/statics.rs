use crate::intern::Address;
use crate::ir::Field;
use crate::state::{DefaultMap, Lattice};
use crate::value_set::ValueSet;
use rustc_hash::FxHashSet;
use std::collections::hash_map;
use std::fmt;

/// The values of static fields.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Statics {
    fields: DefaultMap<Field>,
}

impl Statics {
    /// Create a new, empty `Statics`.
    pub fn new() -> Statics {
        Statics::default()
    }

    pub fn get(&self, field: &Field) -> &ValueSet {
        self.fields.get(field)
    }

    /// Replace the values of `field`. Returns the values previously held.
    pub fn put_strong(&mut self, field: Field, values: ValueSet) -> Option<ValueSet> {
        self.fields.put_strong(field, values)
    }

    /// Add to the values of `field`. Returns the values previously held.
    pub fn put_weak(&mut self, field: Field, values: &ValueSet) -> Option<ValueSet> {
        self.fields.put_weak(field, values)
    }

    pub fn remove(&mut self, field: &Field) -> Option<ValueSet> {
        self.fields.remove(field)
    }

    pub fn iter(&self) -> hash_map::Iter<Field, ValueSet> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn merge(&self, other: &Statics) -> Statics {
        Statics {
            fields: self.fields.merge(&other.fields),
        }
    }

    pub fn minus(&self, other: &Statics) -> Statics {
        Statics {
            fields: self.fields.minus(&other.fields),
        }
    }

    /// Every address held in a static field.
    pub fn roots(&self) -> FxHashSet<Address> {
        self.fields.addresses()
    }

    /// Only the static fields in `fields`.
    pub fn localize(&self, fields: &[Field]) -> Statics {
        let fields: FxHashSet<&Field> = fields.iter().collect();
        Statics {
            fields: self.fields.filter(|field| fields.contains(field)),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        self.fields.to_json(|field| field.signature().to_string())
    }
}

impl Lattice for Statics {
    fn bottom() -> Statics {
        Statics::new()
    }

    fn merge(&self, other: &Statics) -> Statics {
        Statics::merge(self, other)
    }

    fn minus(&self, other: &Statics) -> Statics {
        Statics::minus(self, other)
    }

    fn is_bottom(&self) -> bool {
        self.is_empty()
    }
}

impl fmt::Display for Statics {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.fields)
    }
}
